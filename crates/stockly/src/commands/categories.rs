//! Category command handler.

use tabled::Tabled;

use stockly_api::InventoryClient;
use stockly_core::CoreError;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
}

/// List the distinct category names.
///
/// Unlike the sync loop's background category refresh, an explicit
/// listing request surfaces its failure.
pub async fn list(client: &InventoryClient, global: &GlobalOpts) -> Result<(), CliError> {
    let categories = client
        .list_categories()
        .await
        .map_err(CoreError::from)
        .map_err(CliError::from)?;

    let out = output::render_list(
        &global.output,
        &categories,
        |c| CategoryRow { name: c.clone() },
        Clone::clone,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
