use std::fmt;
use std::fs::Metadata;

const TYPE_MASK: u32 = 0o170000;
const TYPE_SOCKET: u32 = 0o140000;
const TYPE_SYMLINK: u32 = 0o120000;
const TYPE_FILE: u32 = 0o100000;
const TYPE_BLOCK_DEVICE: u32 = 0o060000;
const TYPE_DIRECTORY: u32 = 0o040000;
const TYPE_CHAR_DEVICE: u32 = 0o020000;
const TYPE_FIFO: u32 = 0o010000;

/// File type and permission bits of a filesystem entry, laid out like `st_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    #[cfg(unix)]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self(metadata.mode())
    }

    /// Platforms without `st_mode` only expose the entry type and a read-only flag.
    #[cfg(not(unix))]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        let type_bits = if file_type.is_dir() {
            TYPE_DIRECTORY
        } else if file_type.is_symlink() {
            TYPE_SYMLINK
        } else {
            TYPE_FILE
        };
        let permission_bits = if metadata.permissions().readonly() {
            0o444
        } else {
            0o666
        };
        let exec_bits = if file_type.is_dir() { 0o111 } else { 0 };
        Self(type_bits | permission_bits | exec_bits)
    }

    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub fn is_dir(&self) -> bool {
        self.0 & TYPE_MASK == TYPE_DIRECTORY
    }

    fn type_char(&self) -> char {
        match self.0 & TYPE_MASK {
            TYPE_DIRECTORY => 'd',
            TYPE_SYMLINK => 'l',
            TYPE_SOCKET => 's',
            TYPE_BLOCK_DEVICE => 'b',
            TYPE_CHAR_DEVICE => 'c',
            TYPE_FIFO => 'p',
            TYPE_FILE => '-',
            _ => '?',
        }
    }
}

impl fmt::Display for FileMode {
    /// Renders the mode the way `ls -l` does, including setuid, setgid and sticky bits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::with_capacity(10);
        rendered.push(self.type_char());

        let special = [(0o4000, 's'), (0o2000, 's'), (0o1000, 't')];
        for (triplet, (special_bit, special_char)) in special.into_iter().enumerate() {
            let shift = 6 - triplet * 3;
            let bits = (self.0 >> shift) & 0o7;
            rendered.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            rendered.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            let executable = bits & 0o1 != 0;
            let exec_char = match (self.0 & special_bit != 0, executable) {
                (true, true) => special_char,
                (true, false) => special_char.to_ascii_uppercase(),
                (false, true) => 'x',
                (false, false) => '-',
            };
            rendered.push(exec_char);
        }

        f.write_str(&rendered)
    }
}
