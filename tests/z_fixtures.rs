use anyhow::{Context, Result, bail, ensure};
use googletest::prelude::*;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use watype::free::{free_sem, transitive};
use watype::load::module_type_from_reader;
use watype::sem_module_type;

// each .json module description sits next to a .txt file holding its canonical text and a
// .resolved.txt file holding the text after resolution
const FIXTURE_PATH: &str = "./tests/fixtures/";

fn check_fixture(path: &Path) -> Result<()> {
    let f = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let module = module_type_from_reader(f)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let expected = fs::read_to_string(path.with_extension("txt"))
        .with_context(|| format!("missing expected text for {}", path.display()))?;
    let actual = module.to_string();
    if actual != expected {
        bail!(
            "{}: canonical text mismatch\nexpected:\n{expected}\ngot:\n{actual}",
            path.display()
        );
    }

    let first = sem_module_type(&module);
    let second = sem_module_type(&module);
    ensure!(
        first.types.is_empty(),
        "{}: resolved module kept its type section",
        path.display()
    );
    ensure!(
        first.to_string() == second.to_string(),
        "{}: resolving twice printed differently",
        path.display()
    );

    let closure = transitive(free_sem(&first).into_vec());
    ensure!(
        transitive(closure.clone()) == closure,
        "{}: closure is not stable",
        path.display()
    );

    // the resolved signature, then every type it depends on
    let mut resolved = format!("{first}---\n");
    for x in &closure {
        resolved.push_str(&format!("{x} = {}\n", x.ctx_type()));
    }
    let expected = fs::read_to_string(path.with_extension("resolved.txt"))
        .with_context(|| format!("missing expected resolved text for {}", path.display()))?;
    if resolved != expected {
        bail!(
            "{}: resolved text mismatch\nexpected:\n{expected}\ngot:\n{resolved}",
            path.display()
        );
    }

    Ok(())
}

fn fixtures() -> impl Iterator<Item = PathBuf> {
    fs::read_dir(FIXTURE_PATH)
        .unwrap()
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
}

#[gtest]
fn it_prints_and_resolves_fixtures() {
    let mut count = 0;
    for path in fixtures() {
        count += 1;
        expect_that!(check_fixture(&path), ok(anything()));
    }
    expect_that!(count, gt(0));
}
