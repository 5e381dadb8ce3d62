/// State management module
///
/// This module handles the data side of the app:
/// - Submission forms and their local validation (form.rs)
/// - The persisted session nick (session.rs)

pub mod form;
pub mod session;
