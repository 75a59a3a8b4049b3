pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const LINE_BREAKS: [char; 2] = ['\n', '\r'];
pub const RECORD_SEPARATOR: &[u8] = b"\n\n";
