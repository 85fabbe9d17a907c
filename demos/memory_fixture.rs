//! Seeding a memory filesystem and driving build logic against it.
//!
//! The same `stage_headers` function runs against a seeded in-memory tree and
//! against the real filesystem inside a temporary directory.
//!
//! Run with: `cargo run --example memory_fixture`

use buildfs::*;
use std::path::{Path, PathBuf};

// =============================================================================
// Build logic written against the contract
// =============================================================================

/// Copy every `.h` file below `sources` into `products/include`, keeping the
/// relative layout. Returns the staged paths.
fn stage_headers(
    fs: &dyn Filesystem,
    sources: &Path,
    products: &Path,
) -> Result<Vec<PathBuf>, FsError> {
    let mut headers = Vec::new();
    fs.read_directory(sources, true, &mut |name| {
        if name.extension().is_some_and(|ext| ext == "h") {
            headers.push(name.to_path_buf());
        }
    })?;

    let include = products.join("include");
    let mut staged = Vec::with_capacity(headers.len());
    for header in headers {
        let destination = include.join(&header);
        if let Some(parent) = destination.parent() {
            fs.create_directory(parent, true)?;
        }
        fs.copy_file(&sources.join(&header), &destination)?;
        staged.push(destination);
    }
    Ok(staged)
}

// =============================================================================
// Main
// =============================================================================

fn main() {
    println!("=== buildfs Memory Fixture Example ===\n");

    // --- Seeding ---
    println!("1. Seeding the tree...");
    let fs = MemoryFilesystem::new(vec![
        Entry::directory(
            "src",
            vec![
                Entry::file("main.c", b"#include \"app.h\"\nint main(void) { return 0; }\n".to_vec()),
                Entry::file("app.h", b"#pragma once\n".to_vec()),
                Entry::directory("util", vec![Entry::file("strings.h", b"#pragma once\n".to_vec())]),
            ],
        ),
        Entry::directory("usr", vec![Entry::directory("bin", vec![Entry::file("cc", Vec::new())])]),
    ])
    .unwrap();
    let before = fs.snapshot();
    println!("   Seeded /src and /usr/bin");

    // --- Running build logic ---
    println!("\n2. Staging headers in memory...");
    let staged = stage_headers(&fs, Path::new("/src"), Path::new("/build/Debug")).unwrap();
    for path in &staged {
        println!("   {}", path.display());
    }

    // --- Lookups ---
    println!("\n3. Looking up the compiler...");
    let search = ["/usr/local/bin", "/usr/bin"];
    println!("   cc: {:?}", fs.find_executable("cc", search));
    println!("   ld: {:?}", fs.find_executable("ld", search));

    // --- Failures leave the tree alone ---
    println!("\n4. Writing below a file...");
    let err = fs
        .write(Path::new("/src/main.c/oops"), b"")
        .unwrap_err();
    println!("   Error: {err}");
    println!("   Sources unchanged: {}", fs.snapshot().child("src") == before.child("src"));

    // --- Same logic on disk ---
    println!("\n5. Staging headers on disk...");
    let temp = tempfile_dir();
    let real = RealFilesystem::new();
    let sources = temp.join("src");
    real.create_directory(&sources.join("util"), true).unwrap();
    real.write(&sources.join("app.h"), b"#pragma once\n").unwrap();
    real.write(&sources.join("util/strings.h"), b"#pragma once\n").unwrap();
    let staged = stage_headers(&real, &sources, &temp.join("build")).unwrap();
    println!("   Staged {} headers under {}", staged.len(), temp.display());
    real.remove_directory(&temp, true).unwrap();

    println!("\n=== Example Complete ===");
}

/// A fresh directory under the system temporary directory.
fn tempfile_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("buildfs-demo-{}", std::process::id()));
    RealFilesystem::new().create_directory(&dir, true).unwrap();
    dir
}
