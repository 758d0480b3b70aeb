use super::CharsetEntry;

/// Perforce charset names in declaration order.
///
/// Reverse lookups return the first row whose platform name matches, so the
/// order of rows sharing a platform encoding is significant. Unicode rows
/// follow the Perforce naming for the byte-order mark: a `-bom` suffix writes
/// one and a `-nobom` suffix does not, the bare `utf16` and `utf32` forms write
/// one, and the bare byte-ordered forms do not.
pub(super) const CHARSETS: &[CharsetEntry] = &[
    CharsetEntry::NONE,
    CharsetEntry::AUTO,
    CharsetEntry::new("utf8", "UTF-8"),
    CharsetEntry::marked("utf8-bom", "UTF-8", true),
    CharsetEntry::new("utf8unchecked", "UTF-8"),
    CharsetEntry::marked("utf8unchecked-bom", "UTF-8", true),
    CharsetEntry::new("iso8859-1", "ISO-8859-1"),
    CharsetEntry::new("iso8859-5", "ISO-8859-5"),
    CharsetEntry::new("iso8859-7", "ISO-8859-7"),
    CharsetEntry::new("iso8859-15", "ISO-8859-15"),
    CharsetEntry::new("shiftjis", "Shift_JIS"),
    CharsetEntry::new("eucjp", "EUC-JP"),
    CharsetEntry::new("winansi", "windows-1252"),
    CharsetEntry::new("macosroman", "x-mac-roman"),
    CharsetEntry::new("koi8-r", "KOI8-R"),
    CharsetEntry::new("cp850", "IBM850"),
    CharsetEntry::new("cp858", "IBM00858"),
    CharsetEntry::new("cp866", "IBM866"),
    CharsetEntry::new("cp936", "GBK"),
    CharsetEntry::new("cp949", "windows-949"),
    CharsetEntry::new("cp950", "Big5"),
    CharsetEntry::new("cp1251", "windows-1251"),
    CharsetEntry::new("cp1253", "windows-1253"),
    CharsetEntry::new("cp737", "x-IBM737"),
    CharsetEntry::marked("utf16", "UTF-16", true),
    CharsetEntry::marked("utf16-nobom", "UTF-16", false),
    CharsetEntry::marked("utf16le", "UTF-16LE", false),
    CharsetEntry::marked("utf16le-bom", "UTF-16LE", true),
    CharsetEntry::marked("utf16be", "UTF-16BE", false),
    CharsetEntry::marked("utf16be-bom", "UTF-16BE", true),
    CharsetEntry::marked("utf32", "UTF-32", true),
    CharsetEntry::marked("utf32-nobom", "UTF-32", false),
    CharsetEntry::marked("utf32le", "UTF-32LE", false),
    CharsetEntry::marked("utf32le-bom", "UTF-32LE", true),
    CharsetEntry::marked("utf32be", "UTF-32BE", false),
    CharsetEntry::marked("utf32be-bom", "UTF-32BE", true),
    CharsetEntry::new("gb18030", "GB18030"),
];
