//! Lists the images of a local store.
//!
//! Run with: cargo run --example list_images -- [storage-root] [filter]

use libstash::{RenderOptions, Stash};
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let mut builder = Stash::builder();
    if let Some(root) = args.next() {
        builder = builder.root(root);
    }
    let stash = builder.build()?;
    println!("Reading {}\n", stash.store().images_dir().display());

    let opts = RenderOptions {
        digests: true,
        filter: args.next(),
        ..Default::default()
    };

    match stash.images(&opts) {
        Ok(output) => std::io::stdout().write_all(&output)?,
        Err(e) => eprintln!("✗ {}", e),
    }

    Ok(())
}
