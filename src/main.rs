use std::env;
use std::process::ExitCode;

use basm::arena::Arena;
use basm::image::write_image;
use basm::translator::translate_file;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <input.bm> <output.bin>", program_name(&args));
        return ExitCode::FAILURE;
    }

    let arena = Arena::new();
    let result = translate_file(&arena, &args[1]).and_then(|translator| write_image(&translator, &args[2]));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            ExitCode::FAILURE
        }
    }
}

fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("basm")
}
