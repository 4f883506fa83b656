//! Built-in extension categories.
//!
//! Each entry is a flat list of extension tokens. A token is compared against
//! the text after a file's last `.`, or the whole basename when there is no
//! dot, so exact names such as `DS_Store` or `activate` work too.

/// A named group of extension tokens.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionGroup {
    /// Category name as accepted on the command line and in config files.
    pub name: &'static str,
    /// Case-sensitive extension tokens.
    pub tokens: &'static [&'static str],
}

/// The built-in taxonomy. Append new groups here.
pub static EXTENSION_GROUPS: &[ExtensionGroup] = &[
    ExtensionGroup {
        name: "media",
        tokens: &[
            "png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "svg", "ico", "webp", "psd", "heic",
        ],
    },
    ExtensionGroup {
        name: "office",
        tokens: &[
            "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "pdf", "rtf",
        ],
    },
    ExtensionGroup {
        name: "system",
        tokens: &["DS_Store", "sys", "drv", "cpl", "lnk"],
    },
    ExtensionGroup {
        name: "executables",
        tokens: &["exe", "dll", "so", "dylib", "bin", "msi", "app", "com", "out", "elf"],
    },
    ExtensionGroup {
        name: "archive",
        tokens: &[
            "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "jar", "war", "pack", "idx",
        ],
    },
    ExtensionGroup {
        name: "audio",
        tokens: &["mp3", "wav", "flac", "aac", "ogg", "m4a", "wma", "aiff"],
    },
    ExtensionGroup {
        name: "video",
        tokens: &["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm", "mpeg", "mpg"],
    },
    ExtensionGroup {
        name: "database",
        tokens: &["db", "sqlite", "sqlite3", "mdb", "accdb", "dbf"],
    },
    ExtensionGroup {
        name: "font",
        tokens: &["ttf", "otf", "woff", "woff2", "eot", "fon"],
    },
    ExtensionGroup {
        name: "temporary",
        tokens: &["tmp", "temp", "swp", "swo", "bak", "old"],
    },
    ExtensionGroup {
        name: "compiled-code",
        tokens: &["o", "obj", "class", "a", "lib", "wasm"],
    },
    ExtensionGroup {
        name: "certificate",
        tokens: &["pem", "crt", "cer", "der", "key", "p12", "pfx", "csr"],
    },
    ExtensionGroup {
        name: "configuration",
        tokens: &["ini", "cfg", "conf", "env", "properties"],
    },
    ExtensionGroup {
        name: "virtual-env",
        tokens: &["activate", "venv", "virtualenv", "pth"],
    },
    ExtensionGroup {
        name: "node-modules",
        tokens: &["node_modules", "npmrc", "yarnrc"],
    },
    ExtensionGroup {
        name: "python-bytecode",
        tokens: &["pyc", "pyo", "pyd"],
    },
    ExtensionGroup {
        name: "package-locks",
        tokens: &["lock", "lockb"],
    },
    ExtensionGroup {
        name: "log-files",
        tokens: &["log"],
    },
    ExtensionGroup {
        name: "cache-files",
        tokens: &["cache", "eslintcache", "stylelintcache", "tsbuildinfo"],
    },
];
