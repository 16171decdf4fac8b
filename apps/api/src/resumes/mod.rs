// Resume API: upload intake, extraction and summary endpoints.
// The extracted record travels back to the client and is posted again for
// the summary; nothing is held server-side between the two requests.

pub mod handlers;
pub mod upload;
