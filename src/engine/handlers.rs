//! Command handlers: resolve settings, run the flow, print the report.

use anyhow::Result;
use log::{debug, warn};

use crate::admin::{self, SeedUserParams};
use crate::attach;
use crate::engine::arg_parser::{Cli, Commands, CommonArgs};
use crate::inspect;
use crate::types::Opts;
use crate::utils::settings;
use crate::utils::setup_logging;

/// Setup logging and resolve Opts from CommonArgs plus the settings layers.
/// A settings file that fails to parse is warned about and treated as absent.
fn setup_operation(common: &CommonArgs) -> Opts {
    let loaded = settings::load_settings_toml(&common.dir);
    let file = loaded.as_ref().ok().and_then(|f| f.as_ref());
    let verbose = common.verbose || file.is_some_and(|f| f.verbose());
    setup_logging(verbose);
    if let Err(e) = &loaded {
        warn!("{e:#}");
    }
    let db_path = settings::resolve_db_path(&common.dir, common.db.as_deref(), file);
    debug!("database: {}", db_path.display());
    Opts {
        dir: common.dir.clone(),
        db_path,
        verbose,
    }
}

/// Dispatch the parsed command line.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_operation(&cli.common);
    match &cli.command {
        Commands::AttachImage(args) => {
            let report = attach::attach_user_image(
                &opts.db_path,
                &opts.dir,
                args.user,
                args.image.as_deref(),
            )?;
            attach::print_attach_report(&report);
        }
        Commands::AttachCover(args) => {
            let report = attach::attach_book_cover(&opts.db_path, &args.barcode, &args.image)?;
            attach::print_cover_report(&report);
        }
        Commands::AddBook(args) => {
            let book = admin::add_book(
                &opts.db_path,
                &args.title,
                &args.author,
                &args.barcode,
                args.quantity,
            )?;
            admin::print_new_book(&book);
        }
        Commands::SeedUser(args) => {
            let params = SeedUserParams {
                name: args.name.clone(),
                email: args.email.clone(),
                enrollment_id: args.enrollment.clone(),
                password: args.password.clone(),
            };
            let outcome = admin::seed_user(&opts.db_path, &params)?;
            admin::print_seed_outcome(&outcome, &args.email);
        }
        Commands::SetPassword(args) => {
            admin::set_password(&opts.db_path, &args.email, &args.password)?;
            println!("Password updated for {}", args.email);
        }
        Commands::RefreshDescriptor(args) => {
            let profile = admin::refresh_descriptor(&opts.db_path, args.user)?;
            admin::print_descriptor_report(args.user, &profile);
        }
        Commands::DeleteUsers(args) => {
            let report = admin::delete_users(&opts.db_path, &args.ids)?;
            admin::print_delete_report(&report);
        }
        Commands::Users => {
            let users = inspect::list_users(&opts.db_path)?;
            inspect::print_users(&users);
        }
        Commands::Images => {
            let report = inspect::image_report(&opts.db_path)?;
            inspect::print_image_report(&report);
        }
        Commands::Show => {
            let snap = inspect::snapshot(&opts.db_path)?;
            inspect::print_snapshot(&snap);
        }
    }
    Ok(())
}
