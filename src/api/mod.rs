/// Remote endpoint module
///
/// This module handles all traffic to the spreadsheet-script backend:
/// - Wire envelope and payload shapes (types.rs)
/// - The HTTP client and its five operations (client.rs)

pub mod client;
pub mod types;
