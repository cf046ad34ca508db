//! Block resolution: pair parsing and trait merging.
//!
//! Resolution turns a block's raw body lines into its final key/value map.
//! It is lazy and memoized: a block is resolved the first time it is needed,
//! either while walking its own document or because another block references
//! it as a trait, and is never resolved twice. A block that fails is marked
//! failed and never retried, so its diagnostic is produced once.
//!
//! Precedence on key collisions, lowest to highest:
//! 1. pairs inherited from earlier trait references
//! 2. pairs inherited from later trait references
//! 3. the block's own pairs

use indexmap::IndexMap;
use log::{debug, trace};

use hoodie_core::{BlockId, Document, Resolution};

use crate::{
    error::{Diagnostic, ErrorKind, ParseError, Result},
    lexer,
    traits::TraitTable,
};

/// Resolve every attached block of document `index`, parents before children.
///
/// Trait blocks referenced along the way are resolved in whichever document
/// declares them. The first failure aborts the rest of this document.
pub fn resolve_document(
    documents: &mut [Document],
    index: usize,
    traits: &TraitTable,
) -> std::result::Result<(), ParseError> {
    let order = documents[index].walk();
    debug!(source = documents[index].source(), blocks = order.len(); "Resolving document");

    for id in order {
        resolve_block(documents, index, id, traits)?;
    }
    Ok(())
}

/// Resolve every registered trait in declaration order.
///
/// Run before any document is resolved, so a broken trait is reported once,
/// from the document declaring it. Failures are grouped per declaring
/// document, in document order.
pub fn resolve_traits(documents: &mut [Document], traits: &TraitTable) -> Vec<(usize, ParseError)> {
    let mut failures: IndexMap<usize, Vec<Diagnostic>> = IndexMap::new();
    for (name, location) in traits.iter() {
        if let Err(diag) = resolve_block(documents, location.document, location.block, traits) {
            debug!(name, document = location.document; "Trait failed to resolve");
            failures.entry(location.document).or_default().push(diag);
        }
    }

    failures
        .into_iter()
        .map(|(document, diagnostics)| (document, ParseError::new(diagnostics)))
        .collect()
}

/// Resolve block `id` of document `index` unless it already is.
pub fn resolve_block(
    documents: &mut [Document],
    index: usize,
    id: BlockId,
    traits: &TraitTable,
) -> Result<()> {
    let document = &documents[index];
    let block = document.block(id);
    if block.is_head() {
        return Ok(());
    }
    match block.resolution() {
        Resolution::Resolved => return Ok(()),
        Resolution::Resolving => {
            return Err(Diagnostic::new(ErrorKind::TraitCycle, document.source())
                .with_path_to(document, id)
                .with_help("a trait may not inherit from itself, directly or indirectly"));
        }
        Resolution::Failed => {
            return Err(Diagnostic::new(ErrorKind::TraitFailed, document.source())
                .with_path_to(document, id));
        }
        Resolution::Unresolved => {}
    }

    documents[index].block_mut(id).begin_resolution();
    match merge_pairs(documents, index, id, traits) {
        Ok(pairs) => {
            let block = documents[index].block_mut(id);
            block.take_raw();
            trace!(block = block.name(), pairs = pairs.len(); "Resolved block");
            block.finish_resolution(pairs);
            Ok(())
        }
        Err(diag) => {
            documents[index].block_mut(id).fail_resolution();
            Err(diag)
        }
    }
}

/// Parse the raw body of a block into pairs, in order of appearance.
fn local_pairs(document: &Document, id: BlockId) -> Result<IndexMap<String, String>> {
    let mut pairs = IndexMap::new();
    for line in document.block(id).raw() {
        let [key, value] = line.as_slice() else {
            return Err(Diagnostic::new(ErrorKind::NotPair, document.source())
                .with_message(format!(
                    "{}: `{}`",
                    ErrorKind::NotPair.description(),
                    line.join(" ")
                ))
                .with_path_to(document, id));
        };
        pairs.insert(
            lexer::unquote(key).to_string(),
            lexer::unquote(value).to_string(),
        );
    }
    Ok(pairs)
}

fn merge_pairs(
    documents: &mut [Document],
    index: usize,
    id: BlockId,
    traits: &TraitTable,
) -> Result<IndexMap<String, String>> {
    let local = local_pairs(&documents[index], id)?;
    let references = documents[index].block(id).trait_refs().to_vec();
    if references.is_empty() {
        return Ok(local);
    }

    let mut merged = IndexMap::new();
    for name in &references {
        let Some(location) = traits.get(name) else {
            let document = &documents[index];
            return Err(Diagnostic::new(ErrorKind::UnknownTrait, document.source())
                .with_message(format!("{}: `{name}`", ErrorKind::UnknownTrait.description()))
                .with_path_to(document, id)
                .with_help(format!(
                    "declare it with `trait {name} {{` at the top level of any source"
                )));
        };

        let declared = &documents[location.document];
        if declared.block(location.block).is_failed() {
            let document = &documents[index];
            return Err(Diagnostic::new(ErrorKind::TraitFailed, document.source())
                .with_message(format!("{}: `{name}`", ErrorKind::TraitFailed.description()))
                .with_path_to(document, id)
                .with_help(format!(
                    "`{name}` is declared in {}; fix the error reported there",
                    declared.source()
                )));
        }

        resolve_block(documents, location.document, location.block, traits)?;
        let inherited = documents[location.document].block(location.block).pairs();
        merged.extend(inherited.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    merged.extend(local);
    Ok(merged)
}
