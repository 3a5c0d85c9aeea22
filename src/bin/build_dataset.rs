//! Assemble recorded sequence files into one rectangular dataset:
//! select landmark groups, pad/truncate every sequence to a fixed frame
//! count and write the stacked result as JSON.

use anyhow::{bail, Context, Result};

use holotrace::dataset;
use holotrace::landmark::GroupKind;

fn usage() -> ! {
    eprintln!(
        "Usage: build_dataset --input-dir <dir> --output-file <file> \
         --landmarks <pose,face,left_hand,right_hand> --max-len <frames>"
    );
    std::process::exit(2);
}

struct Args {
    input_dir: String,
    output_file: String,
    landmarks: Vec<GroupKind>,
    max_len: usize,
}

fn parse_args() -> Result<Args> {
    let mut input_dir = None;
    let mut output_file = None;
    let mut landmarks = None;
    let mut max_len = None;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let Some(value) = args.next() else { usage() };
        match flag.as_str() {
            "--input-dir" => input_dir = Some(value),
            "--output-file" => output_file = Some(value),
            "--landmarks" => {
                let kinds: Option<Vec<GroupKind>> =
                    value.split(',').map(GroupKind::from_name).collect();
                match kinds {
                    Some(k) => landmarks = Some(k),
                    None => bail!("unknown landmark group in '{value}'"),
                }
            }
            "--max-len" => {
                max_len = Some(value.parse().context("--max-len must be a positive integer")?)
            }
            _ => usage(),
        }
    }

    let (Some(input_dir), Some(output_file), Some(landmarks), Some(max_len)) =
        (input_dir, output_file, landmarks, max_len)
    else {
        usage()
    };
    Ok(Args { input_dir, output_file, landmarks, max_len })
}

fn main() -> Result<()> {
    let args = parse_args()?;

    println!("Selected groups:");
    for kind in &args.landmarks {
        println!(
            "- {} ({} features, offset {})",
            kind.name(),
            kind.feature_len(),
            kind.offset()
        );
    }
    println!(
        "Features per frame: {}",
        dataset::selected_width(&args.landmarks)
    );

    let (stacked, used) = dataset::build_dataset(&args.input_dir, &args.landmarks, args.max_len)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("Loaded {} sequences:", used.len());
    for path in &used {
        println!("- {}", path.display());
    }

    let json = serde_json::to_string(&stacked)?;
    std::fs::write(&args.output_file, json)
        .with_context(|| format!("failed to write {}", args.output_file))?;
    println!(
        "Wrote {} x {} x {} dataset to {}",
        stacked.len(),
        args.max_len,
        dataset::selected_width(&args.landmarks),
        args.output_file
    );
    Ok(())
}
