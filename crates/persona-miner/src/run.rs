use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use persona_miner_core::{MatchOptions, SemanticMatcher};
use walkdir::WalkDir;

use crate::collection::{self, CollectionPaths};

/// Runs chunking and matching for every collection under
/// `collections_dir`. A failing collection is logged and skipped; it never
/// aborts the batch. A missing collections directory is created with a
/// usage hint instead of erroring.
pub fn run(
    collections_dir: &Path,
    matcher: &SemanticMatcher,
    options: &MatchOptions,
) -> Result<()> {
    run_with(collections_dir, |paths| {
        collection::run_chunk_stage(paths)?;
        collection::run_match_stage(paths, matcher, options)
    })
}

fn run_with<F>(collections_dir: &Path, process_fn: F) -> Result<()>
where
    F: Fn(&CollectionPaths) -> Result<()>,
{
    if !collections_dir.exists() {
        fs::create_dir_all(collections_dir)?;
        println!(
            "[persona-miner] created {}; place collection directories (each with \
             input.json and a pdfs/ folder) inside it",
            collections_dir.display()
        );
        return Ok(());
    }

    let collections = discover_collections(collections_dir);
    if collections.is_empty() {
        println!(
            "[persona-miner] no collections found in {}",
            collections_dir.display()
        );
        return Ok(());
    }

    for root in collections {
        let paths = CollectionPaths::new(root);
        println!("[persona-miner] ===== analyzing {} =====", paths.name());
        if let Err(err) = process_fn(&paths) {
            tracing::error!(
                collection = %paths.name(),
                error = %err,
                "collection failed, continuing with the rest"
            );
        }
    }
    Ok(())
}

fn discover_collections(collections_dir: &Path) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = WalkDir::new(collections_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();
    // Deterministic batch order.
    roots.sort();
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use anyhow::anyhow;
    use tempfile::tempdir;

    #[test]
    fn missing_collections_dir_is_created_with_hint() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("collections");
        let calls: RefCell<usize> = RefCell::new(0);
        run_with(&target, |_| {
            *calls.borrow_mut() += 1;
            Ok(())
        })
        .unwrap();
        assert!(target.is_dir());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn processes_each_collection_subdirectory_in_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("b_trip")).unwrap();
        fs::create_dir(dir.path().join("a_forms")).unwrap();
        fs::write(dir.path().join("stray_file.txt"), "ignored").unwrap();

        let seen: RefCell<Vec<String>> = RefCell::new(Vec::new());
        run_with(dir.path(), |paths| {
            seen.borrow_mut().push(paths.name());
            Ok(())
        })
        .unwrap();
        assert_eq!(
            *seen.borrow(),
            vec!["a_forms".to_string(), "b_trip".to_string()]
        );
    }

    #[test]
    fn failing_collection_does_not_abort_the_batch() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("bad")).unwrap();
        fs::create_dir(dir.path().join("good")).unwrap();

        let seen: RefCell<Vec<String>> = RefCell::new(Vec::new());
        run_with(dir.path(), |paths| {
            seen.borrow_mut().push(paths.name());
            if paths.name() == "bad" {
                Err(anyhow!("missing collection config"))
            } else {
                Ok(())
            }
        })
        .unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn empty_collections_dir_is_a_no_op() {
        let dir = tempdir().unwrap();
        run_with(dir.path(), |_| {
            panic!("no collection should be processed");
        })
        .unwrap();
    }
}
