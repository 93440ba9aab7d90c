pub mod benefit;
pub mod envelope;
pub mod faq;
pub mod support_logo;
pub mod testimonial;
pub mod translation;
