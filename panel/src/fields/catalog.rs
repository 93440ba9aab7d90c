use super::{ActionMessages, EntityTypeConfig, FieldDescriptor, FieldKind, ListRoute};
use crate::form::{FormValues, is_http_url};

fn image_file_or_url(_value: &str, form: &FormValues) -> Result<(), String> {
    if form.has_file("imageFile") || !form.text("imageUrl").trim().is_empty() {
        Ok(())
    } else {
        Err("Please provide either an image file or URL".to_string())
    }
}

fn optional_image_url(value: &str, form: &FormValues) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return image_file_or_url(value, form);
    }
    if is_http_url(value) {
        Ok(())
    } else {
        Err("Please enter a valid URL starting with http:// or https://".to_string())
    }
}

fn language_code(value: &str, _form: &FormValues) -> Result<(), String> {
    let value = value.trim();
    let valid = (2..=5).contains(&value.len())
        && value.chars().all(|c| c.is_ascii_alphabetic() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err("Use a language code such as 'en', 'ru' or 'uz'".to_string())
    }
}

pub(super) static BENEFIT: EntityTypeConfig = EntityTypeConfig {
    type_name: "benefit",
    label: "Benefits",
    endpoint: "/api/admin/benefits",
    create_title: "Add New Benefit",
    edit_title: "Edit Benefit",
    fields: &[
        FieldDescriptor::new("title", FieldKind::Text, "Title")
            .required()
            .placeholder("Enter benefit title"),
        FieldDescriptor::new("description", FieldKind::Textarea, "Description")
            .required()
            .rows(4)
            .placeholder("Describe the benefit"),
        FieldDescriptor::new("displayOrder", FieldKind::Number, "Display Order")
            .required()
            .range(1.0, 4.0)
            .step(1.0)
            .help("Position of the card on the landing page (1 to 4)"),
    ],
    success_messages: ActionMessages {
        create: "Benefit created successfully!",
        update: "Benefit updated successfully!",
        delete: "Benefit deleted successfully!",
    },
    error_messages: ActionMessages {
        create: "Failed to create benefit",
        update: "Failed to update benefit",
        delete: "Failed to delete benefit",
    },
    reorderable: true,
    upsert: false,
    list_route: ListRoute::Collection,
    fetchable: true,
    deletable: true,
};

pub(super) static TESTIMONIAL: EntityTypeConfig = EntityTypeConfig {
    type_name: "testimonial",
    label: "Testimonials",
    endpoint: "/api/admin/testimonials",
    create_title: "Add New Testimonial",
    edit_title: "Edit Testimonial",
    fields: &[
        FieldDescriptor::new("name", FieldKind::Text, "Student Name")
            .required()
            .placeholder("Enter the student's name"),
        FieldDescriptor::new("comment", FieldKind::Textarea, "Comment")
            .required()
            .rows(4),
        FieldDescriptor::new("rating", FieldKind::Number, "Rating")
            .required()
            .range(1.0, 5.0)
            .step(1.0)
            .default_value("5"),
        FieldDescriptor::new("imageFile", FieldKind::File, "Avatar")
            .accept("image/*")
            .preview_key("avatarUrl")
            .help("Optional photo of the student"),
    ],
    success_messages: ActionMessages {
        create: "New testimonial created successfully!",
        update: "Testimonial updated successfully!",
        delete: "Testimonial deleted successfully!",
    },
    error_messages: ActionMessages {
        create: "Failed to create testimonial. Please try again.",
        update: "Failed to update testimonial. Please try again.",
        delete: "Failed to delete testimonial. Please try again.",
    },
    reorderable: false,
    upsert: false,
    list_route: ListRoute::Collection,
    fetchable: true,
    deletable: true,
};

pub(super) static FAQ: EntityTypeConfig = EntityTypeConfig {
    type_name: "faq",
    label: "FAQs",
    endpoint: "/api/admin/faqs",
    create_title: "Add New FAQ",
    edit_title: "Edit FAQ",
    fields: &[
        FieldDescriptor::new("question", FieldKind::Text, "Question")
            .required()
            .max_length(200),
        FieldDescriptor::new("answer", FieldKind::Textarea, "Answer")
            .required()
            .rows(5),
        FieldDescriptor::new("displayOrder", FieldKind::Number, "Display Order")
            .min(0.0)
            .step(1.0),
    ],
    success_messages: ActionMessages {
        create: "FAQ created successfully!",
        update: "FAQ updated successfully!",
        delete: "FAQ deleted successfully!",
    },
    error_messages: ActionMessages {
        create: "Failed to create FAQ",
        update: "Failed to update FAQ",
        delete: "Failed to delete FAQ. Please try again.",
    },
    reorderable: true,
    upsert: false,
    list_route: ListRoute::Collection,
    fetchable: true,
    deletable: true,
};

pub(super) static SUPPORT_LOGO: EntityTypeConfig = EntityTypeConfig {
    type_name: "support-logo",
    label: "Support Logos",
    endpoint: "/api/admin/support-logos",
    create_title: "Add New Support Logo",
    edit_title: "Edit Support Logo",
    fields: &[
        FieldDescriptor::new("name", FieldKind::Text, "Logo Name")
            .required()
            .placeholder("Enter logo name")
            .help("Enter a descriptive name for the support logo"),
        FieldDescriptor::new("imageFile", FieldKind::File, "Logo Image File")
            .accept("image/png,image/jpeg,image/jpg,image/svg+xml")
            .help("Upload a logo image (PNG, JPG, SVG). A file takes precedence over the URL.")
            .validate(image_file_or_url),
        FieldDescriptor::new("imageUrl", FieldKind::Url, "Image URL")
            .placeholder("https://")
            .help("Or provide a URL to an existing image")
            .validate(optional_image_url),
        FieldDescriptor::new("websiteUrl", FieldKind::Url, "Website URL")
            .required()
            .placeholder("https://")
            .help("Website associated with this logo"),
        FieldDescriptor::new("displayOrder", FieldKind::Number, "Display Order")
            .min(0.0)
            .step(1.0)
            .help("Lower numbers appear first"),
    ],
    success_messages: ActionMessages {
        create: "Support logo created successfully!",
        update: "Support logo updated successfully!",
        delete: "Support logo deleted successfully!",
    },
    error_messages: ActionMessages {
        create: "Failed to create support logo",
        update: "Failed to update support logo",
        delete: "Failed to delete the item. Please try again.",
    },
    reorderable: false,
    upsert: false,
    list_route: ListRoute::Collection,
    fetchable: true,
    deletable: true,
};

pub(super) static TRANSLATION: EntityTypeConfig = EntityTypeConfig {
    type_name: "translation",
    label: "Translations",
    endpoint: "/api/admin/translations",
    create_title: "Add Translation",
    edit_title: "Edit Translation",
    fields: &[
        FieldDescriptor::new("key", FieldKind::Text, "Message Key")
            .required()
            .placeholder("home.hero.title"),
        FieldDescriptor::new("languageCode", FieldKind::Text, "Language")
            .required()
            .max_length(5)
            .placeholder("en")
            .validate(language_code),
        FieldDescriptor::new("translatedText", FieldKind::Textarea, "Translation")
            .required()
            .rows(3),
    ],
    success_messages: ActionMessages {
        create: "Translation saved successfully",
        update: "Translation updated successfully",
        delete: "Translation deleted successfully",
    },
    error_messages: ActionMessages {
        create: "Failed to save translation",
        update: "Failed to save translation",
        delete: "Failed to delete translation",
    },
    reorderable: false,
    upsert: true,
    list_route: ListRoute::GroupedPage { size: 100 },
    fetchable: false,
    deletable: false,
};
