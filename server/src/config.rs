use std::env;

/// Returns the value of the named environment variable if it exists or panics.
pub fn get_variable(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("must define {} environment variable", name))
}

/// The persistence strategy, chosen once at process start.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StorageMode {
    /// Registrations live in a JSON file, rewritten on every append.
    File,
    /// Registrations live in process memory only.
    Memory,
}

impl StorageMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "file" => Some(StorageMode::File),
            "memory" => Some(StorageMode::Memory),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StorageMode::File => "file",
            StorageMode::Memory => "memory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StorageMode;

    #[test]
    fn parses_known_modes() {
        assert_eq!(StorageMode::from_name("file"), Some(StorageMode::File));
        assert_eq!(StorageMode::from_name("memory"), Some(StorageMode::Memory));
        assert_eq!(StorageMode::from_name("s3"), None);
    }
}
