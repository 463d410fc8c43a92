use anyhow::Result;

use amv_cli::pipeline::{
    SurnameRunResult, VerifyRunResult, run_surname_stage, run_verify_stage,
};
use amv_oracle::{ChatOracle, Oracle};

use crate::cli::{SurnamesArgs, VerifyArgs};

pub fn run_surnames(args: &SurnamesArgs) -> Result<SurnameRunResult> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.snapshot.with_file_name("surnames.json"));
    run_surname_stage(&args.snapshot, &output)
}

pub fn run_verify(args: &VerifyArgs) -> Result<VerifyRunResult> {
    if args.dry_run {
        return run_verify_stage(&args.input, &args.pairs, None);
    }
    let oracle = ChatOracle::from_env(&args.base_url, &args.model)?;
    run_verify_stage(&args.input, &args.pairs, Some(&oracle as &dyn Oracle))
}
