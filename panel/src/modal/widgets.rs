//! File upload widgets bound to file-kind fields while a dialog is open.

use crate::fields::FieldDescriptor;
use crate::form::StagedFile;
use crate::logger::logger;

/// One upload control owned by the modal session.
///
/// Widgets are created when a dialog opens and destroyed exactly once when
/// it closes; a destroyed widget ignores everything.
pub trait FileWidget {
    fn field_name(&self) -> &'static str;

    fn stage(&mut self, file: StagedFile);

    fn staged(&self) -> Option<&StagedFile>;

    /// Preview of the staged file, if any.
    fn preview_url(&self) -> Option<String> {
        self.staged().map(StagedFile::data_url)
    }

    fn destroy(&mut self);

    fn is_destroyed(&self) -> bool;
}

pub trait FileWidgetFactory {
    fn create(&self, field: &'static FieldDescriptor) -> Box<dyn FileWidget>;
}

/// In-memory upload slot holding at most one staged file.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSlot {
    field: &'static str,
    staged: Option<StagedFile>,
    destroyed: bool,
}

impl UploadSlot {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            staged: None,
            destroyed: false,
        }
    }
}

impl FileWidget for UploadSlot {
    fn field_name(&self) -> &'static str {
        self.field
    }

    fn stage(&mut self, file: StagedFile) {
        if self.destroyed {
            logger().warn(
                "FileWidget",
                format!("Ignoring file staged on released slot '{}'", self.field),
                None,
            );
            return;
        }
        self.staged = Some(file);
    }

    fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    fn destroy(&mut self) {
        self.staged = None;
        self.destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UploadSlotFactory;

impl FileWidgetFactory for UploadSlotFactory {
    fn create(&self, field: &'static FieldDescriptor) -> Box<dyn FileWidget> {
        Box::new(UploadSlot::new(field.name))
    }
}
