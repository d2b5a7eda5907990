use crate::context::{AppContext, VerbosityLevel};
use crate::format;
use clap::Args;
use libstash::{RenderOptions, Result, name_argument};

pub mod handlers;

/// Flags and arguments of `stash images`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagesArgs {
    /// Display only image IDs
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not print column headings
    #[arg(short = 'n', long)]
    pub noheading: bool,

    /// Do not truncate output
    #[arg(long, alias = "notruncate")]
    pub no_trunc: bool,

    /// Show image digests
    #[arg(long)]
    pub digests: bool,

    /// Change the output format to json or a template
    #[arg(long)]
    pub format: Option<String>,

    /// Filter output based on conditions provided (dangling, label, before, since)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Only list images with this name
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

impl ImagesArgs {
    /// Listing options for the given image name
    ///
    /// An empty `--format` counts as no format.
    pub fn render_options(&self, name: Option<&str>) -> RenderOptions {
        RenderOptions {
            quiet: self.quiet,
            no_heading: self.noheading,
            truncate: !self.no_trunc,
            digests: self.digests,
            format: self.format.clone().filter(|f| !f.is_empty()),
            name: name.map(str::to_string),
            filter: self.filter.clone(),
        }
    }
}

/// Run the listing and return the bytes to print
///
/// Arguments are checked before the store is opened.
pub fn list_images(ctx: &AppContext, args: &ImagesArgs) -> Result<Vec<u8>> {
    let name = name_argument(&args.names)?;
    let opts = args.render_options(name);

    let stash = ctx.open_stash()?;
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!(
            "Reading images from {}",
            stash.store().images_dir().display()
        ),
    );
    if let Some(filter) = &opts.filter {
        format::print(
            ctx,
            VerbosityLevel::VeryVerbose,
            &format!("Applying filter: {}", filter),
        );
    }

    stash.images(&opts)
}
