//! Sector listing command implementation.

use factorlake_eval::SECTORS;

/// List the sector labels accepted by `--sectors`.
pub(crate) fn list_sectors() {
    println!("Sectors:");
    println!("{}", "-".repeat(60));
    for sector in SECTORS {
        println!("  {}", sector);
    }
    println!();
    println!("Matching is case-insensitive. Use e.g. --sectors technology,healthcare\n");
}
