//! Well-known parameter names.

/// Field carrying the function name of a packet.
pub const FUNC: &str = "func";
/// Function the client must call to answer a request.
pub const CONFIRM: &str = "confirm";
/// Generic payload field.
pub const DATA: &str = "data";
/// Secondary payload field.
pub const DATA2: &str = "data2";
/// First message code of an error or info result.
pub const CODE0: &str = "code0";
/// First message format string of an error or info result.
pub const FMT0: &str = "fmt0";
/// Authentication token returned to the server.
pub const TOKEN: &str = "token";
/// Depot-syntax file path.
pub const DEPOT_FILE: &str = "depotFile";
/// Client-syntax file path.
pub const CLIENT_FILE: &str = "clientFile";
/// Single sign-on response payload.
pub const SSO: &str = "sso";
