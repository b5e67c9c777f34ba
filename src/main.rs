mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_compare, run_convert, run_extract};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();

    match args.command {
        Commands::Extract {
            image,
            regions,
            palette_size,
            output,
            format,
        } => run_extract(args.verbose, image, regions, palette_size, output, format),
        Commands::Compare {
            original,
            current_url,
            current_image,
            selector,
            viewport,
            auto_viewport,
            threshold,
            metric,
            wait,
            font_search,
            regions,
            output_dir,
            nav_timeout,
            process_timeout,
            format,
            output,
        } => {
            run_compare(
                &raw_args,
                args.config,
                args.verbose,
                original,
                current_url,
                current_image,
                selector,
                viewport,
                auto_viewport,
                threshold,
                metric,
                wait,
                font_search,
                regions,
                output_dir,
                nav_timeout,
                process_timeout,
                format,
                output,
            )
            .await
        }
        Commands::Convert {
            input,
            output,
            format,
        } => run_convert(args.verbose, input, output, format),
    }
}
