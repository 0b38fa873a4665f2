//! Hash command implementation.

use std::path::Path;

use docseal_core::ContentHasher;
use docseal_store::Sha256ContentHasher;

pub fn run(pdf: String) -> Result<(), Box<dyn std::error::Error>> {
    let hash = Sha256ContentHasher
        .hash_pdf_content(Path::new(&pdf))
        .map_err(|e| format!("Failed to hash {}: {}", pdf, e))?;
    println!("{}", hash);
    Ok(())
}
