use std::io;
use uri_transform::variant::{self, VariantConfig};

fn main() {
    let config = VariantConfig::new();
    for line in io::stdin().lines() {
        let line = line.expect("failed to read line");
        match variant::generate(&line, &config) {
            Ok(report) => {
                for v in &report {
                    println!("{v:#}");
                }
                println!();
            }
            Err(e) => println!("Error: {e}"),
        };
    }
}
