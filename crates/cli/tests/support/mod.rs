#![allow(dead_code)]

use std::path::{Path, PathBuf};

use object::write::{Object, Symbol, SymbolSection};
use object::{
    Architecture, BinaryFormat, Endianness, SectionKind, SymbolFlags, SymbolKind, SymbolScope,
};

/// The built CLI; on glibc hosts it doubles as a dynamically linked fixture.
pub fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_glibc-check"))
}

/// Write a relocatable ELF object: valid image, no dynamic imports.
pub fn write_elf_without_imports(path: &Path) {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    let text_id = obj.add_section(Vec::new(), b".text".to_vec(), SectionKind::Text);
    obj.append_section_data(text_id, &[0xC3], 1);
    obj.add_symbol(Symbol {
        name: b"entry".to_vec(),
        value: 0,
        size: 1,
        kind: SymbolKind::Text,
        scope: SymbolScope::Linkage,
        weak: false,
        section: SymbolSection::Section(text_id),
        flags: SymbolFlags::None,
    });
    std::fs::write(path, obj.write().expect("write object")).expect("write fixture");
}
