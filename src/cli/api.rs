//
//  storedesk
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends an arbitrary request through the same client every other command
//! uses, so the session token, the allow-list and the error classification
//! all apply. Prints the normalized envelope.
//!
//! ## Examples
//!
//! ```bash
//! # List page 2 of paid orders
//! sd api /order/list -q page=2 -q size=20 -q status=1
//!
//! # Create a coupon
//! sd api -X POST /coupon -F name="Spring sale" -F discount=5 -F threshold=50
//!
//! # Only print the payload's total
//! sd api /user/list --select data.total
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Args;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::RequestDescriptor;
use crate::output::select_path;
use crate::util::parse_key_value;

use super::GlobalOptions;

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path relative to the base URL (e.g., /order/list)
    pub path: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Query parameters as key=value (can be specified multiple times)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Request body fields as key=value; values are typed like JSON and keys
    /// can be nested with dots
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Raw string body fields as key=value
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read the JSON request body from a file (- for stdin)
    #[arg(long, short = 'f', conflicts_with_all = ["field", "raw_field"])]
    pub input: Option<String>,

    /// Request headers as 'Name: Value' (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Print only the value at this dotted path of the envelope
    #[arg(long)]
    pub select: Option<String>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let descriptor = self.build_descriptor()?;
        let client = global.client(descriptor.raw_path())?;

        let envelope = client.request(descriptor).await?;
        let document = serde_json::to_value(&envelope)?;

        let output = match &self.select {
            Some(path) => select_path(&document, path)
                .with_context(|| format!("Nothing at '{}' in the response", path))?,
            None => &document,
        };

        global.writer().write_raw(output)
    }

    fn build_descriptor(&self) -> Result<RequestDescriptor> {
        let mut descriptor = RequestDescriptor::new(self.parse_method()?, self.path.clone());

        for pair in &self.query {
            let (key, value) = parse_key_value(pair)?;
            descriptor = descriptor.query(key, value);
        }

        if let Some(body) = self.build_body()? {
            descriptor = descriptor.json(body);
        }

        for header in &self.header {
            let (name, value) = parse_header(header)?;
            descriptor = descriptor.header(name, value);
        }

        Ok(descriptor)
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn build_body(&self) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                std::io::read_to_string(std::io::stdin())?
            } else {
                fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
            };
            let value: Value =
                serde_json::from_str(&content).context("Request body is not valid JSON")?;
            return Ok(Some(value));
        }

        if self.field.is_empty() && self.raw_field.is_empty() {
            return Ok(None);
        }

        let mut body = Map::new();
        for field in &self.field {
            let (key, raw) = parse_key_value(field)?;
            set_nested_value(&mut body, &key, typed_value(&raw));
        }
        for field in &self.raw_field {
            let (key, raw) = parse_key_value(field)?;
            set_nested_value(&mut body, &key, Value::String(raw));
        }

        Ok(Some(Value::Object(body)))
    }
}

/// Interprets a field value the way a JSON literal would read.
fn typed_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Number(n.into())
            } else if let Some(n) = raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
            {
                Value::Number(n)
            } else if raw.starts_with('[') || raw.starts_with('{') {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

fn parse_header(header: &str) -> Result<(String, String)> {
    match header.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid header format: {}. Expected 'Name: Value'", header),
    }
}
