//! Name to code lookup over the code tables
//!
//! A registry is built once from a [`CodeTable`] and an exclusion list.
//! Each selectable entry is registered twice at construction time, once
//! under its canonical upper-case name and once under a lower-case alias,
//! so a lookup is a plain map read.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Result, UImageError};
use crate::image_types::{ARCH_TABLE, COMPRESSION_TABLE, CodeTable, IMAGE_TYPE_TABLE, OS_TABLE};

/// Selectable options of one code table
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    table: &'static CodeTable,
    /// Upper-case names first, then lower-case aliases
    options: Vec<String>,
    lookup: HashMap<String, u8>,
}

impl OptionRegistry {
    /// Build a registry for `table`, hiding the entries named in `excluded`
    ///
    /// Names in `excluded` are given without the table prefix. Excluded
    /// entries keep their code in the table; they just cannot be selected.
    pub fn build(table: &'static CodeTable, excluded: &[&str]) -> Self {
        let mut selectable: Vec<(&str, u8)> = table
            .iter()
            .filter(|(name, _)| !excluded.contains(name))
            .collect();
        selectable.sort_unstable_by_key(|&(name, _)| name);

        let mut options = Vec::with_capacity(selectable.len() * 2);
        let mut lookup = HashMap::with_capacity(selectable.len() * 2);

        // Sorted upper-case names first, then their aliases in the same
        // order, so names that start with a digit (4_4BSD) stay grouped.
        for &(name, code) in &selectable {
            options.push(name.to_string());
            lookup.insert(name.to_string(), code);
        }
        for &(name, code) in &selectable {
            let alias = name.to_ascii_lowercase();
            if !lookup.contains_key(&alias) {
                options.push(alias.clone());
                lookup.insert(alias, code);
            }
        }

        Self {
            table,
            options,
            lookup,
        }
    }

    /// The code table this registry reads from
    pub fn table(&self) -> &'static CodeTable {
        self.table
    }

    /// Resolve a symbolic name to its code
    ///
    /// Canonical upper-case names match exactly; anything else is matched
    /// case-insensitively against the lower-case aliases.
    pub fn resolve(&self, name: &str) -> Result<u8> {
        if let Some(&code) = self.lookup.get(name) {
            return Ok(code);
        }
        self.lookup
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| UImageError::unknown_option(self.table.kind, name))
    }

    /// Names that may be offered on a command surface
    ///
    /// Canonical names in byte order, followed by the lower-case aliases in
    /// the same order.
    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(String::as_str).collect()
    }

    /// Canonical name of a code, including excluded entries
    pub fn name_of(&self, code: u8) -> Option<&'static str> {
        self.table.short_name(code)
    }
}

/// The four registries used by the header builder
#[derive(Debug, Clone)]
pub struct Registries {
    pub os: OptionRegistry,
    pub arch: OptionRegistry,
    pub image_type: OptionRegistry,
    pub compression: OptionRegistry,
}

impl Registries {
    fn new() -> Self {
        Self {
            os: OptionRegistry::build(&OS_TABLE, &["INVALID"]),
            arch: OptionRegistry::build(&ARCH_TABLE, &["INVALID"]),
            image_type: OptionRegistry::build(&IMAGE_TYPE_TABLE, &["INVALID"]),
            compression: OptionRegistry::build(&COMPRESSION_TABLE, &[]),
        }
    }
}

static REGISTRIES: LazyLock<Registries> = LazyLock::new(Registries::new);

/// Process-wide registries, built on first use and never modified
pub fn registries() -> &'static Registries {
    &REGISTRIES
}
