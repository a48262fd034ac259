//! Static registry of file extensions, MIME types, and document kinds.
//!
//! The declaration order of [`STANDARD_TABLE`] is significant: the resolver
//! walks it front to back and the first MIME type found in an attachment's
//! metadata wins.

use serde::Serialize;

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MimeEntry {
    /// File extension including the leading dot (e.g. `".pdf"`).
    pub extension: &'static str,
    /// MIME type string (e.g. `"application/pdf"`).
    pub mime_type: &'static str,
    /// Human-readable kind of document.
    pub description: &'static str,
}

const fn entry(
    extension: &'static str,
    mime_type: &'static str,
    description: &'static str,
) -> MimeEntry {
    MimeEntry {
        extension,
        mime_type,
        description,
    }
}

/// Immutable view over a registry table.
#[derive(Debug, Clone, Copy)]
pub struct MimeRegistry {
    entries: &'static [MimeEntry],
}

static STANDARD: MimeRegistry = MimeRegistry {
    entries: STANDARD_TABLE,
};

impl MimeRegistry {
    /// The process-wide built-in registry.
    pub fn standard() -> &'static MimeRegistry {
        &STANDARD
    }

    /// A registry over a caller-supplied table, in the table's order.
    pub const fn from_table(entries: &'static [MimeEntry]) -> Self {
        Self { entries }
    }

    /// All rows in declaration order.
    pub fn entries(&self) -> &'static [MimeEntry] {
        self.entries
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every MIME type in declaration order. Types declared twice appear twice.
    pub fn mime_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.mime_type)
    }

    /// Extension of the first row declaring `mime_type`.
    pub fn extension_for(&self, mime_type: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.mime_type == mime_type)
            .map(|e| e.extension)
    }

    /// MIME type of the first row declaring `extension` (dot included).
    pub fn mime_type_for(&self, extension: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.extension == extension)
            .map(|e| e.mime_type)
    }

    /// Document description of the first row declaring `mime_type`.
    pub fn description_for(&self, mime_type: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.mime_type == mime_type)
            .map(|e| e.description)
    }
}

/// Built-in table of common document, image, audio, video, and archive types.
pub const STANDARD_TABLE: &[MimeEntry] = &[
    entry(".aac", "audio/aac", "AAC audio"),
    entry(".abw", "application/x-abiword", "AbiWord document"),
    entry(".apng", "image/apng", "Animated Portable Network Graphics (APNG) image"),
    entry(".arc", "application/x-freearc", "Archive document (multiple files embedded)"),
    entry(".avif", "image/avif", "AVIF image"),
    entry(".avi", "video/x-msvideo", "AVI: Audio Video Interleave"),
    entry(".azw", "application/vnd.amazon.ebook", "Amazon Kindle eBook format"),
    entry(".bin", "application/octet-stream", "Any kind of binary data"),
    entry(".bmp", "image/bmp", "Windows OS/2 Bitmap Graphics"),
    entry(".bz", "application/x-bzip", "BZip archive"),
    entry(".bz2", "application/x-bzip2", "BZip2 archive"),
    entry(".cda", "application/x-cdf", "CD audio"),
    entry(".csh", "application/x-csh", "C-Shell script"),
    entry(".css", "text/css", "Cascading Style Sheets (CSS)"),
    entry(".csv", "text/csv", "Comma-separated values (CSV)"),
    entry(".doc", "application/msword", "Microsoft Word"),
    entry(
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "Microsoft Word (OpenXML)",
    ),
    entry(".eot", "application/vnd.ms-fontobject", "MS Embedded OpenType fonts"),
    entry(".epub", "application/epub+zip", "Electronic publication (EPUB)"),
    entry(".gz", "application/gzip", "GZip Compressed Archive"),
    entry(".gif", "image/gif", "Graphics Interchange Format (GIF)"),
    entry(".html", "text/html", "HyperText Markup Language (HTML)"),
    entry(".ico", "image/vnd.microsoft.icon", "Icon format"),
    entry(".ics", "text/calendar", "iCalendar format"),
    entry(".jar", "application/java-archive", "Java Archive (JAR)"),
    entry(".jpg", "image/jpeg", "JPEG images"),
    entry(".js", "text/javascript", "JavaScript"),
    entry(".json", "application/json", "JSON format"),
    entry(".jsonld", "application/ld+json", "JSON-LD format"),
    entry(".mid", "audio/midi", "Musical Instrument Digital Interface (MIDI)"),
    entry(".mjs", "text/javascript", "JavaScript module"),
    entry(".mp3", "audio/mpeg", "MP3 audio"),
    entry(".mp4", "video/mp4", "MP4 video"),
    entry(".mpeg", "video/mpeg", "MPEG Video"),
    entry(".mpkg", "application/vnd.apple.installer+xml", "Apple Installer Package"),
    entry(
        ".odp",
        "application/vnd.oasis.opendocument.presentation",
        "OpenDocument presentation document",
    ),
    entry(
        ".ods",
        "application/vnd.oasis.opendocument.spreadsheet",
        "OpenDocument spreadsheet document",
    ),
    entry(".odt", "application/vnd.oasis.opendocument.text", "OpenDocument text document"),
    entry(".oga", "audio/ogg", "OGG audio"),
    entry(".ogv", "video/ogg", "OGG video"),
    entry(".ogx", "application/ogg", "OGG"),
    entry(".opus", "audio/opus", "Opus audio"),
    entry(".otf", "font/otf", "OpenType font"),
    entry(".png", "image/png", "Portable Network Graphics"),
    entry(".pdf", "application/pdf", "Adobe Portable Document Format (PDF)"),
    entry(".php", "application/x-httpd-php", "Hypertext Preprocessor (Personal Home Page)"),
    entry(".ppt", "application/vnd.ms-powerpoint", "Microsoft PowerPoint"),
    entry(
        ".pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "Microsoft PowerPoint (OpenXML)",
    ),
    entry(".rar", "application/vnd.rar", "RAR archive"),
    entry(".rtf", "application/rtf", "Rich Text Format (RTF)"),
    entry(".sh", "application/x-sh", "Bourne shell script"),
    entry(".svg", "image/svg+xml", "Scalable Vector Graphics (SVG)"),
    entry(".tar", "application/x-tar", "Tape Archive (TAR)"),
    entry(".tif", "image/tiff", "Tagged Image File Format (TIFF)"),
    entry(".ts", "video/mp2t", "MPEG transport stream"),
    entry(".ttf", "font/ttf", "TrueType Font"),
    entry(".txt", "text/plain", "Text, (generally ASCII or ISO 8859-n)"),
    entry(".vsd", "application/vnd.visio", "Microsoft Visio"),
    entry(".wav", "audio/wav", "Waveform Audio Format"),
    entry(".weba", "audio/webm", "WEBM audio"),
    entry(".webm", "video/webm", "WEBM video"),
    entry(".webp", "image/webp", "WEBP image"),
    entry(".woff", "font/woff", "Web Open Font Format (WOFF)"),
    entry(".woff2", "font/woff2", "Web Open Font Format (WOFF)"),
    entry(".xhtml", "application/xhtml+xml", "XHTML"),
    entry(".xls", "application/vnd.ms-excel", "Microsoft Excel"),
    entry(
        ".xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "Microsoft Excel (OpenXML)",
    ),
    entry(".xml", "application/xml", "XML"),
    entry(".xul", "application/vnd.mozilla.xul+xml", "XUL"),
    entry(".zip", "application/zip", "ZIP archive"),
    entry(".3gp", "video/3gpp; audio/3gpp", "3GPP audio/video container"),
    entry(".3g2", "video/3gpp2; audio/3gpp2", "3GPP2 audio/video container"),
    entry(".7z", "application/x-7z-compressed", "7-zip archive"),
];
