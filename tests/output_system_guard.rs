//! The redirector and the system slots must never write to the terminal directly:
//! everything they emit has to go through a sink so it can be gated.

use std::fs;
use std::path::Path;

#[test]
fn check_output_system_usage() {
    let project_root = env!("CARGO_MANIFEST_DIR");
    let restricted_files = [
        "src/redirect/mod.rs",
        "src/redirect/guard.rs",
        "src/redirect/policy.rs",
        "src/sink.rs",
        "src/system.rs",
    ];
    let forbidden_tokens = [
        "print!",
        "println!",
        "eprint!",
        "eprintln!",
        "dbg!",
        "std::io::stdout()",
        "std::io::stderr()",
    ];

    let mut violations = Vec::new();

    for relative_path in restricted_files {
        let full_path = Path::new(project_root).join(relative_path);
        let contents = fs::read_to_string(&full_path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", relative_path));

        'line: for (idx, line) in contents.lines().enumerate() {
            for token in forbidden_tokens {
                if let Some(pos) = line.find(token) {
                    if line
                        .find("//")
                        .map(|comment_pos| comment_pos <= pos)
                        .unwrap_or(false)
                    {
                        continue 'line;
                    }

                    violations.push(format!("{}:{}: {}", relative_path, idx + 1, line.trim()));
                    continue 'line;
                }
            }
        }
    }

    if !violations.is_empty() {
        panic!(
            "Direct output found in gated output code:\n{}",
            violations.join("\n")
        );
    }
}
