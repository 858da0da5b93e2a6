//! Module serialization: a pre-pass fixes every index space (imports
//! first, then declarations, in input order) and deduplicates function
//! signatures; the sections are then written in canonical id order, with
//! empty sections omitted. Two structurally identical modules produce
//! byte-identical binaries.

use std::collections::HashMap;

use smol_str::SmolStr;

use tessera_ir::model::node::{FuncNode, Node};
use tessera_ir::model::types::{ExportKind, ImportDesc, MemoryLimits, ValType};

use crate::binary::context::EmitContext;
use crate::binary::writer::ByteWriter;
use crate::binary::{SectionId, MAGIC, VERSION};
use crate::error::{EmitError, Result};

use super::instr;

/// Functions with this prefix are internal: never auto-exported.
const INTERNAL_PREFIX: &str = "$_";

/// Deduplicated function signatures in first-appearance order.
#[derive(Debug, Default)]
struct TypeTable {
    keys: HashMap<String, u32>,
    sigs: Vec<(Vec<ValType>, Vec<ValType>)>,
}

impl TypeTable {
    fn intern(&mut self, params: Vec<ValType>, results: Vec<ValType>) -> u32 {
        let key = canonical_key(&params, &results);
        if let Some(&idx) = self.keys.get(&key) {
            return idx;
        }
        let idx = self.sigs.len() as u32;
        self.keys.insert(key, idx);
        self.sigs.push((params, results));
        idx
    }
}

fn canonical_key(params: &[ValType], results: &[ValType]) -> String {
    use std::fmt::Write;
    let mut key = String::new();
    for p in params {
        let _ = write!(key, "{p},");
    }
    key.push_str("->");
    for r in results {
        let _ = write!(key, "{r},");
    }
    key
}

/// Everything the pre-pass learns about the module.
struct Layout<'m> {
    types: TypeTable,
    imports: Vec<(&'m SmolStr, &'m SmolStr, &'m ImportDesc, u32)>,
    funcs: Vec<(&'m FuncNode, u32)>,
    memories: Vec<MemoryLimits>,
    explicit_exports: Vec<(&'m SmolStr, ExportKind, &'m SmolStr)>,
}

/// Serialize a module to its binary form.
pub fn emit_module(module: &Node) -> Result<Vec<u8>> {
    let Node::Module { items } = module else {
        return Err(EmitError::MalformedControl {
            msg: "top-level node must be a module",
        });
    };

    let mut cx = EmitContext::new();
    let layout = prepass(items, &mut cx)?;

    let mut w = ByteWriter::new();
    w.bytes(&MAGIC);
    w.bytes(&VERSION);

    write_type_section(&mut w, &layout);
    write_import_section(&mut w, &layout);
    write_function_section(&mut w, &layout);
    write_memory_section(&mut w, &layout);
    write_export_section(&mut w, &layout, &cx)?;
    write_code_section(&mut w, &layout, &mut cx)?;

    Ok(w.into_vec())
}

/// Partition imports by kind, then assign indices: imported entities
/// first, declared entities after, each in input order. Function
/// signatures are interned as encountered so type indices follow first
/// appearance.
fn prepass<'m>(items: &'m [Node], cx: &mut EmitContext) -> Result<Layout<'m>> {
    let mut layout = Layout {
        types: TypeTable::default(),
        imports: Vec::new(),
        funcs: Vec::new(),
        memories: Vec::new(),
        explicit_exports: Vec::new(),
    };
    let mut imported_funcs = 0u32;
    let mut imported_globals = 0u32;

    for item in items {
        match item {
            Node::Import {
                module,
                field,
                name,
                desc,
            } => {
                let type_idx = match desc {
                    ImportDesc::Func { params, results } => {
                        let idx =
                            layout.types.intern(params.clone(), results.clone());
                        cx.declare_func(name.clone(), imported_funcs);
                        imported_funcs += 1;
                        idx
                    }
                    ImportDesc::Global { .. } => {
                        cx.declare_global(name.clone(), imported_globals);
                        imported_globals += 1;
                        0
                    }
                    _ => 0,
                };
                layout.imports.push((module, field, desc, type_idx));
            }
            Node::Func(func) => {
                let params: Vec<ValType> =
                    func.params.iter().map(|d| d.ty).collect();
                let type_idx = layout.types.intern(params, func.results.clone());
                let index = imported_funcs + layout.funcs.len() as u32;
                cx.declare_func(func.name.clone(), index);
                layout.funcs.push((func.as_ref(), type_idx));
            }
            Node::Memory { limits } => layout.memories.push(*limits),
            Node::Export { name, kind, target } => {
                layout.explicit_exports.push((name, *kind, target));
            }
            _ => {
                return Err(EmitError::MalformedControl {
                    msg: "unsupported module-level node",
                })
            }
        }
    }
    Ok(layout)
}

fn write_type_section(w: &mut ByteWriter, layout: &Layout<'_>) {
    if layout.types.sigs.is_empty() {
        return;
    }
    let mut payload = ByteWriter::new();
    payload.u32(layout.types.sigs.len() as u32);
    for (params, results) in &layout.types.sigs {
        payload.u8(0x60);
        payload.u32(params.len() as u32);
        for p in params {
            payload.u8(p.byte());
        }
        payload.u32(results.len() as u32);
        for r in results {
            payload.u8(r.byte());
        }
    }
    w.section(SectionId::Type as u8, &payload);
}

fn write_limits(payload: &mut ByteWriter, limits: &MemoryLimits) {
    payload.u8(limits.flags());
    payload.u32(limits.min);
    if let Some(max) = limits.max {
        payload.u32(max);
    }
}

fn write_import_section(w: &mut ByteWriter, layout: &Layout<'_>) {
    if layout.imports.is_empty() {
        return;
    }
    let mut payload = ByteWriter::new();
    payload.u32(layout.imports.len() as u32);
    for (module, field, desc, type_idx) in &layout.imports {
        payload.name(module);
        payload.name(field);
        payload.u8(desc.kind_byte());
        match desc {
            ImportDesc::Func { .. } => payload.u32(*type_idx),
            ImportDesc::Table { min, max } => {
                payload.u8(ValType::FuncRef.byte());
                payload.u8(if max.is_some() { 0x01 } else { 0x00 });
                payload.u32(*min);
                if let Some(max) = max {
                    payload.u32(*max);
                }
            }
            ImportDesc::Memory(limits) => write_limits(&mut payload, limits),
            ImportDesc::Global { ty, mutable } => {
                payload.u8(ty.byte());
                payload.u8(u8::from(*mutable));
            }
        }
    }
    w.section(SectionId::Import as u8, &payload);
}

fn write_function_section(w: &mut ByteWriter, layout: &Layout<'_>) {
    if layout.funcs.is_empty() {
        return;
    }
    let mut payload = ByteWriter::new();
    payload.u32(layout.funcs.len() as u32);
    for (_, type_idx) in &layout.funcs {
        payload.u32(*type_idx);
    }
    w.section(SectionId::Function as u8, &payload);
}

fn write_memory_section(w: &mut ByteWriter, layout: &Layout<'_>) {
    if layout.memories.is_empty() {
        return;
    }
    let mut payload = ByteWriter::new();
    payload.u32(layout.memories.len() as u32);
    for limits in &layout.memories {
        write_limits(&mut payload, limits);
    }
    w.section(SectionId::Memory as u8, &payload);
}

/// Export name for a declared function: a single leading `$` is
/// dropped; `$_`-prefixed functions stay internal.
fn auto_export_name(name: &str) -> Option<&str> {
    if name.is_empty() || name.starts_with(INTERNAL_PREFIX) {
        return None;
    }
    Some(name.strip_prefix('$').unwrap_or(name))
}

fn write_export_section(
    w: &mut ByteWriter,
    layout: &Layout<'_>,
    cx: &EmitContext,
) -> Result<()> {
    // Declared functions export themselves under their stripped name;
    // explicit export nodes then override same-named entries or append.
    let mut entries: Vec<(String, u8, u32)> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for (func, _) in &layout.funcs {
        if let Some(export_name) = auto_export_name(&func.name) {
            let index =
                cx.func_index(&func.name)
                    .ok_or_else(|| EmitError::UnresolvedName {
                        kind: "function",
                        name: func.name.clone(),
                    })?;
            by_name.insert(export_name.to_owned(), entries.len());
            entries.push((export_name.to_owned(), ExportKind::Func.byte(), index));
        }
    }

    for (name, kind, target) in &layout.explicit_exports {
        let index = match kind {
            ExportKind::Func => cx.resolve_func(target)?,
            ExportKind::Global => cx.resolve_global(target)?,
            // Tables and memories have no symbolic index space; the
            // target is the index itself.
            ExportKind::Table | ExportKind::Memory => {
                target.parse().map_err(|_| EmitError::UnresolvedName {
                    kind: "export target",
                    name: (*target).clone(),
                })?
            }
        };
        let entry = (name.to_string(), kind.byte(), index);
        match by_name.get(name.as_str()) {
            Some(&pos) => entries[pos] = entry,
            None => {
                by_name.insert(name.to_string(), entries.len());
                entries.push(entry);
            }
        }
    }

    if entries.is_empty() {
        return Ok(());
    }
    let mut payload = ByteWriter::new();
    payload.u32(entries.len() as u32);
    for (name, kind, index) in &entries {
        payload.name(name);
        payload.u8(*kind);
        payload.u32(*index);
    }
    w.section(SectionId::Export as u8, &payload);
    Ok(())
}

/// Run-length compression of the locals declaration: consecutive locals
/// of one type coalesce into a single (count, type) entry.
fn coalesce_locals(func: &FuncNode) -> Vec<(u32, ValType)> {
    let mut groups: Vec<(u32, ValType)> = Vec::new();
    for decl in &func.locals {
        match groups.last_mut() {
            Some((count, ty)) if *ty == decl.ty => *count += 1,
            _ => groups.push((1, decl.ty)),
        }
    }
    groups
}

fn write_code_section(
    w: &mut ByteWriter,
    layout: &Layout<'_>,
    cx: &mut EmitContext,
) -> Result<()> {
    if layout.funcs.is_empty() {
        return Ok(());
    }
    let mut payload = ByteWriter::new();
    payload.u32(layout.funcs.len() as u32);
    for (func, _) in &layout.funcs {
        let mut body = ByteWriter::new();
        let groups = coalesce_locals(func);
        body.u32(groups.len() as u32);
        for (count, ty) in groups {
            body.u32(count);
            body.u8(ty.byte());
        }

        cx.begin_func(
            func.params
                .iter()
                .map(|d| &d.name)
                .chain(func.locals.iter().map(|d| &d.name)),
        );
        instr::emit_all(&mut body, cx, &func.body)?;
        body.u8(crate::binary::END);

        payload.u32(body.len() as u32);
        payload.bytes(body.as_slice());
    }
    w.section(SectionId::Code as u8, &payload);
    Ok(())
}
