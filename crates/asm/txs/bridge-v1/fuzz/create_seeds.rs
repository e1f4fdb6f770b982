// Helper program to create seed corpus files
// Run with: cargo run --bin create_seeds

use std::fs;
use std::io::Write;

// Copy the FuzzDepositTx structure here and create valid examples
// This would need to be compiled separately or integrated into the fuzzer

fn main() {
    println!("Creating seed corpus files...");

    // Create seeds directory
    fs::create_dir_all("corpus/parse_deposit/seeds").unwrap();
    fs::create_dir_all("corpus/parse_commit/seeds").unwrap();
    fs::create_dir_all("corpus/parse_deposit_request/seeds").unwrap();
    fs::create_dir_all("corpus/parse_withdrawal_fulfillment/seeds").unwrap();

    println!("Seed directories created.");
    println!("\nTo generate actual seed files:");
    println!("1. Manually create FuzzDepositTx structs with interesting values");
    println!("2. Serialize them using arbitrary-compatible format");
    println!("3. Save to corpus/*/seeds/");
    println!("\nAlternatively, run fuzzer once and manually select interesting corpus files as seeds.");
}
