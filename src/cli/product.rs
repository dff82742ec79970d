//
//  storedesk
//  cli/product.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Product commands

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::resources::{Product, ProductDraft};
use crate::api::AdminClient;
use crate::interactive::prompt_confirm;
use crate::output::{format_amount, format_bool, or_dash, print_field, TableOutput, TableRow};
use crate::util::{format_size, format_timestamp, guess_image_mime, truncate};

use super::{GlobalOptions, PageArgs};

/// Manage products
#[derive(Args, Debug)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProductSubcommand {
    /// List products
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a product
    View(ViewArgs),

    /// Create a product
    Create(CreateArgs),

    /// List or unlist a product in the storefront
    Publish(PublishArgs),

    /// Upload a product image and print its URL
    Upload(UploadArgs),

    /// Delete a product
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Only products in this category
    #[arg(long, short = 'c')]
    pub category: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Product ID
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Product name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Unit price
    #[arg(long, short = 'p')]
    pub price: f64,

    /// Units in stock
    #[arg(long, short = 's', default_value = "0")]
    pub stock: i64,

    /// Category ID
    #[arg(long, short = 'c')]
    pub category: Option<u64>,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Image file to upload and attach
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Product ID
    pub id: u64,

    /// Take the product off the storefront instead
    #[arg(long)]
    pub off: bool,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Image file
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Product ID
    pub id: u64,

    /// Skip confirmation prompt
    #[arg(long)]
    pub confirm: bool,
}

impl TableRow for Product {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "PRICE", "STOCK", "ON SALE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let stock = if color && self.stock <= 0 {
            style(self.stock).red().to_string()
        } else {
            self.stock.to_string()
        };
        vec![
            self.id.to_string(),
            truncate(&self.name, 40),
            format_amount(self.price),
            stock,
            format_bool(self.on_sale, color),
        ]
    }
}

impl TableOutput for Product {
    fn print_table(&self, color: bool) {
        let title = if color {
            style(&self.name).bold().to_string()
        } else {
            self.name.clone()
        };
        println!("{} #{}", title, self.id);
        println!();
        print_field("Price", &format_amount(self.price), 10, color);
        print_field("Stock", &self.stock.to_string(), 10, color);
        print_field("On sale", &format_bool(self.on_sale, color), 10, color);
        print_field(
            "Category",
            &or_dash(self.category_id.map(|c| c.to_string()).as_deref()),
            10,
            color,
        );
        print_field("Image", &or_dash(self.image.as_deref()), 10, color);
        print_field(
            "Created",
            &or_dash(self.create_time.as_deref().map(format_timestamp).as_deref()),
            10,
            color,
        );
    }
}

#[derive(Debug, Serialize)]
struct UploadResult {
    url: String,
}

impl TableOutput for UploadResult {
    fn print_table(&self, _color: bool) {
        println!("{}", self.url);
    }
}

impl ProductCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProductSubcommand::List(args) => self.list(args, global).await,
            ProductSubcommand::View(args) => self.view(args, global).await,
            ProductSubcommand::Create(args) => self.create(args, global).await,
            ProductSubcommand::Publish(args) => self.publish(args, global).await,
            ProductSubcommand::Upload(args) => self.upload(args, global).await,
            ProductSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&args.page.location("/products"))?;
        let page = client
            .list_products(&args.page.query(), args.category)
            .await?;

        let writer = global.writer();
        writer.write_list(&page.records, "No products found.")?;
        if !page.records.is_empty() {
            writer.write_info(&format!(
                "Page {} of {} ({} products)",
                page.page,
                page.total_pages().max(1),
                page.total
            ));
        }
        Ok(())
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&format!("/products/{}", args.id))?;
        let product = client.get_product(args.id).await?;
        global.writer().write(&product)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        if args.price < 0.0 {
            bail!("Price cannot be negative");
        }

        let client = global.client("/products/new")?;
        let image = match &args.image {
            Some(path) => Some(upload_image(&client, path).await?),
            None => None,
        };

        let draft = ProductDraft {
            name: args.name.clone(),
            price: args.price,
            stock: args.stock,
            category_id: args.category,
            description: args.description.clone(),
            image,
        };
        let envelope = client.create_product(&draft).await?;

        let writer = global.writer();
        if global.json {
            writer.write_raw(&envelope)?;
        } else {
            writer.write_success(&format!("Created product '{}'", draft.name));
        }
        Ok(())
    }

    async fn publish(&self, args: &PublishArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client(&format!("/products/{}", args.id))?;
        client.set_product_on_sale(args.id, !args.off).await?;

        let state = if args.off { "off sale" } else { "on sale" };
        global
            .writer()
            .write_success(&format!("Product #{} is now {}", args.id, state));
        Ok(())
    }

    async fn upload(&self, args: &UploadArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client("/products/new")?;
        let url = upload_image(&client, &args.file).await?;
        global.writer().write(&UploadResult { url })
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        if !args.confirm && !prompt_confirm(&format!("Delete product #{}?", args.id))? {
            global.writer().write_info("Cancelled.");
            return Ok(());
        }

        let client = global.client("/products")?;
        client.delete_product(args.id).await?;
        global
            .writer()
            .write_success(&format!("Deleted product #{}", args.id));
        Ok(())
    }
}

async fn upload_image(client: &AdminClient, path: &Path) -> Result<String> {
    let mime = guess_image_mime(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    tracing::debug!(file = %file_name, size = %format_size(bytes.len() as u64), "uploading image");
    Ok(client.upload_product_image(&file_name, mime, bytes).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_row_plain() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 5, "name": "Teapot", "price": 19.9, "stock": 0, "onSale": true
        }))
        .unwrap();
        assert_eq!(product.row(false), vec!["5", "Teapot", "19.90", "0", "Yes"]);
        assert_eq!(Product::headers().len(), product.row(false).len());
    }
}
