//! The meta server administrative command catalog.
//!
//! Commands are declared once in [`META_ADMIN_COMMANDS`]. [`Catalog`] indexes
//! them by normalized (ASCII lowercase) name, so lookups are
//! case-insensitive, and remembers the longest name for aligned help output.
//!
//! The catalog is built once at startup and then only read.

use std::collections::BTreeMap;

use qfs_mon_client::MetaOpCode;

/// One administrative command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    /// Declared name, also sent to the server as the request verb.
    pub name: &'static str,
    pub op_code: MetaOpCode,
    pub description: &'static str,
}

/// Every command the meta server accepts through the monitor interface.
pub const META_ADMIN_COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "CHECK_LEASES",
        op_code: MetaOpCode::CheckLeases,
        description: "debug: run chunk leases check",
    },
    CommandEntry {
        name: "RECOMPUTE_DIRSIZE",
        op_code: MetaOpCode::RecomputeDirsize,
        description: "debug: recompute directories sizes",
    },
    CommandEntry {
        name: "DUMP_CHUNKTOSERVERMAP",
        op_code: MetaOpCode::DumpChunkToServerMap,
        description: "create chunk server to chunk id map file used by the off line \
                      re-balance utility and layout emulator",
    },
    CommandEntry {
        name: "DUMP_CHUNKREPLICATIONCANDIDATES",
        op_code: MetaOpCode::DumpChunkReplicationCandidates,
        description: "debug: list content of the chunks re-replication and recovery queues",
    },
    CommandEntry {
        name: "OPEN_FILES",
        op_code: MetaOpCode::OpenFiles,
        description: "debug: list all chunk leases",
    },
    CommandEntry {
        name: "GET_CHUNK_SERVERS_COUNTERS",
        op_code: MetaOpCode::GetChunkServersCounters,
        description: "stats: output chunk server counters",
    },
    CommandEntry {
        name: "GET_CHUNK_SERVER_DIRS_COUNTERS",
        op_code: MetaOpCode::GetChunkServerDirsCounters,
        description: "stats: output chunk directories counters",
    },
    CommandEntry {
        name: "GET_REQUEST_COUNTERS",
        op_code: MetaOpCode::GetRequestCounters,
        description: "stats: get meta server request counters",
    },
];

/// Lowercase `input` byte by byte; non-ASCII-letters pass through.
pub fn normalize(input: &str) -> String {
    input.to_ascii_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("commands {first} and {second} both normalize to {name}")]
    DuplicateName {
        name: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Normalized name -> command, iterated in name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CommandEntry>,
    max_name_len: usize,
}

impl Catalog {
    /// Catalog of [`META_ADMIN_COMMANDS`].
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_entries(META_ADMIN_COMMANDS)
    }

    /// Index `entries`. Two entries with the same normalized name are
    /// rejected rather than one silently replacing the other.
    pub fn from_entries(entries: &[CommandEntry]) -> Result<Self, CatalogError> {
        let mut map: BTreeMap<String, CommandEntry> = BTreeMap::new();
        let mut max_name_len = 0;
        for entry in entries {
            let key = normalize(entry.name);
            if let Some(existing) = map.get(&key) {
                return Err(CatalogError::DuplicateName {
                    name: key,
                    first: existing.name,
                    second: entry.name,
                });
            }
            max_name_len = max_name_len.max(key.len());
            map.insert(key, *entry);
        }
        Ok(Self {
            entries: map,
            max_name_len,
        })
    }

    /// Look up a user token; returns the normalized name and the entry.
    pub fn get(&self, token: &str) -> Option<(&str, &CommandEntry)> {
        self.entries
            .get_key_value(&normalize(token))
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest normalized name.
    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("CHECK_LEASES"), "check_leases");
        assert_eq!(normalize("Open_Files-2"), "open_files-2");
        assert_eq!(normalize(""), "");
        // Non-ASCII bytes are left alone.
        assert_eq!(normalize("ÄBC"), "Äbc");
    }

    #[test]
    fn test_builtin_contains_all_commands() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), META_ADMIN_COMMANDS.len());
        assert_eq!(catalog.len(), 8);
        for entry in META_ADMIN_COMMANDS {
            let (name, found) = catalog.get(entry.name).unwrap();
            assert_eq!(name, normalize(entry.name));
            assert_eq!(found, entry);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();
        for token in ["Check_Leases", "check_leases", "CHECK_LEASES", "cHeCk_LeAsEs"] {
            let (name, entry) = catalog.get(token).unwrap();
            assert_eq!(name, "check_leases");
            assert_eq!(entry.op_code, MetaOpCode::CheckLeases);
            assert_eq!(entry.name, "CHECK_LEASES");
        }
        assert!(catalog.get("check-leases").is_none());
        assert!(catalog.get("").is_none());
    }

    #[test]
    fn test_max_name_len() {
        let catalog = Catalog::builtin().unwrap();
        let longest = catalog.iter().map(|(name, _)| name.len()).max().unwrap();
        assert_eq!(catalog.max_name_len(), longest);
        assert_eq!(catalog.max_name_len(), "dump_chunkreplicationcandidates".len());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let catalog = Catalog::builtin().unwrap();
        let names: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names[0], "check_leases");
    }

    #[test]
    fn test_build_is_repeatable() {
        let first = Catalog::builtin().unwrap();
        let second = Catalog::builtin().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_duplicate_normalized_name_rejected() {
        const ENTRIES: &[CommandEntry] = &[
            CommandEntry {
                name: "OPEN_FILES",
                op_code: MetaOpCode::OpenFiles,
                description: "first",
            },
            CommandEntry {
                name: "open_files",
                op_code: MetaOpCode::CheckLeases,
                description: "second",
            },
        ];
        let err = Catalog::from_entries(ENTRIES).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateName {
                name: "open_files".into(),
                first: "OPEN_FILES",
                second: "open_files",
            }
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_entries(&[]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.max_name_len(), 0);
    }
}
