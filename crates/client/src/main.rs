//! tablegate-client CLI entry point.

use clap::Parser;
use tablegate_client::cli::items::PageArgs;
use tablegate_client::cli::{Cli, Commands, OutputFormat};
use tablegate_client::client::TablegateClient;
use tablegate_client::output::{format_item_page, format_output, pretty};
use tablegate_client::ClientError;
use tablegate_core::expression::{parse_attribute_names, parse_attribute_values, Expression};
use tablegate_core::item::Item;
use tablegate_core::paging::{Page, PageRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TablegateClient::new(&cli.base_url);

    match cli.command {
        Commands::Items(items_cmd) => {
            use tablegate_client::cli::items::ItemsAction;
            match items_cmd.action {
                ItemsAction::List { table, page } => {
                    let page = client.list_items(&table, &page_request(&page)?).await?;
                    print_page(&page, cli.format);
                }
                ItemsAction::Create {
                    table,
                    id,
                    name,
                    phone,
                } => {
                    client
                        .create_item_with_details(&table, &id, &name, &phone)
                        .await?;
                    if !cli.quiet {
                        println!("Created item {} in {}", id, table);
                    }
                }
                ItemsAction::Put { table, item } => {
                    let item: Item = serde_json::from_str(&item).map_err(|e| {
                        ClientError::InvalidInput(format!("item is not a JSON object: {}", e))
                    })?;
                    client.create_item(&table, &item).await?;
                    if !cli.quiet {
                        println!("Created item in {}", table);
                    }
                }
                ItemsAction::Get { table, id } => {
                    let item = client.get_item(&table, &id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_item(&item)),
                    }
                }
                ItemsAction::Update {
                    table,
                    id,
                    name,
                    phone,
                } => {
                    client
                        .update_item(&table, &id, name.as_deref(), phone.as_deref())
                        .await?;
                    if !cli.quiet {
                        println!("Updated item {} in {}", id, table);
                    }
                }
                ItemsAction::Delete { table, id } => {
                    client.delete_item(&table, &id).await?;
                    if !cli.quiet {
                        println!("Deleted item {} from {}", id, table);
                    }
                }
                ItemsAction::Query {
                    table,
                    key_condition,
                    values,
                    names,
                    page,
                } => {
                    let expression = expression(key_condition, &values, names.as_deref())?;
                    let page = client
                        .query(&table, &expression, &page_request(&page)?)
                        .await?;
                    print_page(&page, cli.format);
                }
                ItemsAction::Scan {
                    table,
                    filter,
                    values,
                    names,
                    page,
                } => {
                    let expression = expression(filter, &values, names.as_deref())?;
                    let page = client
                        .scan(&table, &expression, &page_request(&page)?)
                        .await?;
                    print_page(&page, cli.format);
                }
            }
        }
        Commands::Tables(tables_cmd) => {
            use tablegate_client::cli::tables::TablesAction;
            match tables_cmd.action {
                TablesAction::List => {
                    let tables = client.list_tables().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&tables, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_tables(&tables)),
                    }
                }
                TablesAction::Create { name } => {
                    client.create_table(&name).await?;
                    if !cli.quiet {
                        println!("Created table {}", name);
                    }
                }
                TablesAction::Delete { name } => {
                    client.delete_table(&name).await?;
                    if !cli.quiet {
                        println!("Deleted table {}", name);
                    }
                }
            }
        }
        Commands::Health(health_cmd) => {
            use tablegate_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    client.livez().await?;
                    if !cli.quiet {
                        println!("Live");
                    }
                }
                HealthAction::Ready => {
                    let readiness = client.readyz().await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&readiness, cli.format))
                        }
                        OutputFormat::Pretty => match &readiness.error {
                            Some(error) => println!("Not ready: {}", error),
                            None => println!("Ready: {}", readiness.ready),
                        },
                    }
                    if !readiness.ready {
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}

fn page_request(args: &PageArgs) -> Result<PageRequest, ClientError> {
    Ok(PageRequest::from_params(args.limit, args.cursor.as_deref())?)
}

fn expression(
    text: String,
    values: &str,
    names: Option<&str>,
) -> Result<Expression, ClientError> {
    let mut expression = Expression::new(text).with_values(parse_attribute_values(values)?);
    if let Some(names) = names {
        expression = expression.with_names(parse_attribute_names(names)?);
    }
    Ok(expression)
}

fn print_page(page: &Page<Item>, format: OutputFormat) {
    println!("{}", format_item_page(page, format));
}
