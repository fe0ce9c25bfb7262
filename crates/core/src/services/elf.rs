//! Imported dynamic symbols and their GNU version requirements.
//!
//! Only the pieces of ELF needed to answer "which versioned symbols does this
//! image expect a shared library to provide" are read: `.dynsym`, `.dynstr`,
//! `.gnu.version` and `.gnu.version_r`.

use std::collections::HashMap;

use goblin::elf::{section_header, sym, symver, Elf, Sym};
use goblin::Object;
use thiserror::Error;

/// Why a file could not be opened as an ELF image.
#[derive(Debug, Error)]
pub enum OpenFailure {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid object file: {0}")]
    Malformed(#[from] goblin::error::Error),

    #[error("expected an ELF image, found {0}")]
    UnsupportedFormat(&'static str),
}

#[derive(Debug, Error)]
pub enum ElfError {
    #[error(transparent)]
    Open(#[from] OpenFailure),

    #[error("{0}")]
    SymbolTable(String),
}

/// A dynamic symbol the image expects to be resolved at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSymbol {
    pub name: String,
    /// Version tag attached by the linker (e.g. `GLIBC_2.17`); empty when unversioned.
    pub version: String,
    /// Shared object the version requirement belongs to (e.g. `libc.so.6`).
    pub library: Option<String>,
}

#[derive(Debug, Clone)]
struct VersionNeed {
    name: String,
    library: Option<String>,
}

/// Parse `bytes` as an ELF image and list its imported dynamic symbols.
///
/// Images without a dynamic table (static executables, relocatable objects)
/// simply have no imports.
pub fn imported_symbols(bytes: &[u8]) -> Result<Vec<ImportedSymbol>, ElfError> {
    let elf = match Object::parse(bytes).map_err(OpenFailure::Malformed)? {
        Object::Elf(elf) => elf,
        other => return Err(OpenFailure::UnsupportedFormat(format_name(&other)).into()),
    };

    let needs = version_needs(&elf)?;
    let mut imports = Vec::new();

    // Index 0 is the reserved null symbol.
    for (index, symbol) in elf.dynsyms.iter().enumerate().skip(1) {
        if !is_import(&symbol) {
            continue;
        }
        let name = elf.dynstrtab.get_at(symbol.st_name).ok_or_else(|| {
            ElfError::SymbolTable(format!(
                "dynamic symbol {index} has name offset {} outside .dynstr",
                symbol.st_name
            ))
        })?;
        let need = symbol_need(&elf, &needs, index);
        imports.push(ImportedSymbol {
            name: name.to_string(),
            version: need.map(|n| n.name.clone()).unwrap_or_default(),
            library: need.and_then(|n| n.library.clone()),
        });
    }

    Ok(imports)
}

fn format_name(object: &Object) -> &'static str {
    match object {
        Object::Elf(_) => "ELF",
        Object::PE(_) => "PE",
        Object::Mach(_) => "Mach-O",
        Object::Archive(_) => "archive",
        _ => "unknown format",
    }
}

/// Undefined and `STB_GLOBAL`. Weak references such as `__cxa_finalize` are not imports.
fn is_import(symbol: &Sym) -> bool {
    symbol.st_shndx == section_header::SHN_UNDEF as usize && symbol.st_bind() == sym::STB_GLOBAL
}

/// Map each `.gnu.version_r` auxiliary index to its version name and library.
fn version_needs(elf: &Elf) -> Result<HashMap<u16, VersionNeed>, ElfError> {
    let mut needs = HashMap::new();
    let Some(verneed) = &elf.verneed else {
        return Ok(needs);
    };

    for need in verneed.iter() {
        let library = elf.dynstrtab.get_at(need.vn_file).map(str::to_string);
        for aux in need.iter() {
            let name = elf.dynstrtab.get_at(aux.vna_name).ok_or_else(|| {
                ElfError::SymbolTable(format!(
                    "version requirement {} has name offset {} outside .dynstr",
                    aux.vna_other, aux.vna_name
                ))
            })?;
            needs.insert(
                aux.vna_other,
                VersionNeed { name: name.to_string(), library: library.clone() },
            );
        }
    }

    Ok(needs)
}

fn symbol_need<'n>(
    elf: &Elf,
    needs: &'n HashMap<u16, VersionNeed>,
    index: usize,
) -> Option<&'n VersionNeed> {
    let versym = elf.versym.as_ref()?.get_at(index)?;
    let version_index = versym.version();
    // 0 (local) and 1 (global) carry no version requirement.
    if version_index <= symver::VER_NDX_GLOBAL {
        return None;
    }
    needs.get(&version_index)
}
