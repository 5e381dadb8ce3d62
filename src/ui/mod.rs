/// Reusable form widgets
///
/// - Labeled text input (text_field.rs)
/// - Image slot card with pick/clear actions (uploader.rs)

pub mod text_field;
pub mod uploader;
