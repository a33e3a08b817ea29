//! Product command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use stockly_api::InventoryClient;
use stockly_core::{Product, ProductDraft, ProductId, QueryState, Session, ViewModel};

use crate::cli::{DeleteArgs, DraftArgs, GlobalOpts, ListArgs, OutputFormat, UpdateArgs};
use crate::error::CliError;
use crate::output;

use super::confirm;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            quantity: p.quantity,
            price: format!("{:.2}", p.price),
            category: p.category.clone().unwrap_or_else(|| "-".into()),
            created: p
                .created_at
                .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d").to_string()),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(
    client: InventoryClient,
    page_size: u32,
    args: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = QueryState::new()
        .with_sort_field(args.sort.into())
        .with_sort_order(args.order.into())
        .with_category(args.category)
        .with_search_term(args.search.unwrap_or_default());

    let session = Session::with_query(client, page_size, query);
    let mut vm = session.start().await;
    fail_on_error(&vm)?;

    if args.page > 1 {
        vm = session.go_to_page(args.page).await;
        fail_on_error(&vm)?;
        if vm.page != args.page && !global.quiet {
            eprintln!(
                "Page {} does not exist ({} pages), showing page {}",
                args.page, vm.total_pages, vm.page
            );
        }
    }

    let out = output::render_list(&global.output, &vm.items, |p| ProductRow::from(p), |p| {
        p.id.to_string()
    });
    output::print_output(&out, global.quiet);

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let footer = format!(
            "Page {}/{} -- {} products",
            vm.page, vm.total_pages, vm.total_items
        );
        if output::should_color(&global.color) {
            eprintln!("{}", footer.dimmed());
        } else {
            eprintln!("{footer}");
        }
    }

    Ok(())
}

pub async fn create(
    client: InventoryClient,
    page_size: u32,
    args: DraftArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let session = Session::new(client, page_size);
    session.submit_form(&to_draft(args), None).await?;
    if !global.quiet {
        eprintln!("Product created");
    }
    Ok(())
}

pub async fn update(
    client: InventoryClient,
    page_size: u32,
    args: UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let session = Session::new(client, page_size);
    let id = ProductId::from(args.id);
    session.submit_form(&to_draft(args.draft), Some(&id)).await?;
    if !global.quiet {
        eprintln!("Product updated");
    }
    Ok(())
}

pub async fn delete(
    client: InventoryClient,
    page_size: u32,
    args: DeleteArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !confirm(
        &format!("Delete product {}? This cannot be undone.", args.id),
        global.yes,
    )? {
        return Ok(());
    }

    let session = Session::new(client, page_size);
    session.delete_product(&ProductId::from(args.id)).await?;
    if !global.quiet {
        eprintln!("Product deleted");
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────

fn to_draft(args: DraftArgs) -> ProductDraft {
    ProductDraft {
        name: args.name,
        quantity: args.quantity,
        price: args.price,
        category: args.category,
    }
}

/// A one-shot invocation has no later render to surface the error in,
/// so a failed fetch becomes a hard CLI error.
fn fail_on_error(vm: &ViewModel) -> Result<(), CliError> {
    match &vm.error {
        Some(message) => Err(CliError::Fetch {
            message: message.clone(),
        }),
        None => Ok(()),
    }
}
