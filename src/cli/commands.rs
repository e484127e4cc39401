//! Command implementations

use anyhow::Result;
use tracing::info;

use crate::app::*;
use crate::cli::args::{CropArgs, InspectArgs, PreviewArgs, TrimArgs};
use crate::cli::Commands;
use crate::domain::model::OverwritePolicy;
use crate::utils::Utils;

fn overwrite_flag(overwrite: bool) -> Option<OverwritePolicy> {
    overwrite.then_some(OverwritePolicy::Always)
}

/// Run the selected command
pub async fn dispatch(container: &dyn AppContainer, command: Commands) -> Result<()> {
    match command {
        Commands::Crop(args) => crop(container, args).await,
        Commands::Trim(args) => trim(container, args).await,
        Commands::Preview(args) => preview(container, args).await,
        Commands::Inspect(args) => inspect(container, args).await,
    }
}

/// Execute the crop command
pub async fn crop(container: &dyn AppContainer, args: CropArgs) -> Result<()> {
    let request = CropRequest {
        input: args.input,
        output: args.output,
        region: args.region,
        display_size: args.display_size,
        start: args.start,
        end: args.end,
        keep_audio: !args.no_audio,
        crf: args.crf,
        preset: args.preset,
        video_codec: args.codec,
        overwrite: overwrite_flag(args.overwrite),
    };

    let response = container.crop_interactor().execute(request).await?;

    println!("Cropped {} -> {}", response.region, response.output.display());
    if let Some(range) = response.range {
        println!("  Range: {}", range);
    }
    println!(
        "  Size: {}, took {}",
        Utils::format_file_size(response.output_size),
        Utils::format_duration(response.elapsed)
    );
    for warning in &response.warnings {
        println!("  Warning: {}", warning);
    }
    Ok(())
}

/// Execute the trim command
pub async fn trim(container: &dyn AppContainer, args: TrimArgs) -> Result<()> {
    let request = TrimRequest {
        input: args.input,
        output: args.output,
        start: args.start,
        end: args.end,
        overwrite: overwrite_flag(args.overwrite),
    };

    let response = container.trim_interactor().execute(request).await?;

    println!("Trimmed {} -> {}", response.range, response.output.display());
    println!(
        "  Size: {}, took {}",
        Utils::format_file_size(response.output_size),
        Utils::format_duration(response.elapsed)
    );
    for warning in &response.warnings {
        println!("  Warning: {}", warning);
    }
    Ok(())
}

/// Execute the preview command
pub async fn preview(container: &dyn AppContainer, args: PreviewArgs) -> Result<()> {
    let request = PreviewRequest {
        input: args.input,
        output: args.output,
        at: args.at,
        region: args.region,
        display_size: args.display_size,
        crop: args.crop,
        overwrite: overwrite_flag(args.overwrite),
    };

    let response = container.preview_interactor().execute(request).await?;

    match response.region {
        Some(region) => println!(
            "Frame at {} cropped to {} -> {}",
            response.at,
            region,
            response.output.display()
        ),
        None => println!(
            "Frame at {} ({}) -> {}",
            response.at,
            response.frame,
            response.output.display()
        ),
    }
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    let request = InspectRequest {
        input: args.input,
        format: args.format,
    };

    let response = container.inspect_interactor().execute(request).await?;
    print!("{}", response.summary);
    if !response.summary.ends_with('\n') {
        println!();
    }

    info!("Inspect operation completed successfully");
    Ok(())
}
