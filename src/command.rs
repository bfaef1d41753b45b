//! Bot command grammar.
//!
//! Multi-field commands take their fields separated by `|`, e.g.
//! `/add_product Widget | 9.99 | A small widget`. Fields are trimmed.

use teloxide::utils::command::{BotCommands, ParseError};

/// Field separator for multi-field commands
pub const FIELD_SEPARATOR: char = '|';

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message.")]
    Start,
    #[command(description = "display this text.")]
    Help,
    #[command(
        description = "add a product: name | price | description",
        parse_with = parse_new_product
    )]
    AddProduct {
        name: String,
        price: f64,
        description: String,
    },
    #[command(
        description = "edit a product by ID: id | name | price | description",
        parse_with = parse_product_edit
    )]
    EditProduct {
        id: i64,
        name: String,
        price: f64,
        description: String,
    },
    #[command(description = "remove a product by ID.", parse_with = parse_product_id)]
    RemoveProduct { id: i64 },
    #[command(description = "list all products.")]
    ListProducts,
    #[command(description = "show stock.")]
    Stock,
}

fn split_fields(input: &str, expected: usize) -> Result<Vec<String>, ParseError> {
    let fields: Vec<String> = if input.trim().is_empty() {
        Vec::new()
    } else {
        input
            .split(FIELD_SEPARATOR)
            .map(|field| field.trim().to_string())
            .collect()
    };

    if fields.len() < expected {
        return Err(ParseError::TooFewArguments {
            expected,
            found: fields.len(),
            message: format!("Expected {expected} fields separated by '{FIELD_SEPARATOR}'"),
        });
    }
    if fields.len() > expected {
        return Err(ParseError::TooManyArguments {
            expected,
            found: fields.len(),
            message: format!("Expected {expected} fields separated by '{FIELD_SEPARATOR}'"),
        });
    }

    Ok(fields)
}

fn parse_name(raw: String) -> Result<String, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::IncorrectFormat(
            "product name must not be empty".into(),
        ));
    }
    Ok(raw)
}

fn parse_price(raw: &str) -> Result<f64, ParseError> {
    let price = raw
        .parse::<f64>()
        .map_err(|e| ParseError::IncorrectFormat(Box::new(e)))?;

    // JSON has no NaN or infinity, so such a price could not be stored
    if !price.is_finite() {
        return Err(ParseError::IncorrectFormat(
            format!("price must be a finite number, got {raw:?}").into(),
        ));
    }
    Ok(price)
}

fn parse_id(raw: &str) -> Result<i64, ParseError> {
    raw.parse::<i64>()
        .map_err(|e| ParseError::IncorrectFormat(Box::new(e)))
}

fn parse_new_product(input: String) -> Result<(String, f64, String), ParseError> {
    let mut fields = split_fields(&input, 3)?.into_iter();
    let (name, price, description) = (
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
    );

    Ok((parse_name(name)?, parse_price(&price)?, description))
}

fn parse_product_edit(input: String) -> Result<(i64, String, f64, String), ParseError> {
    let mut fields = split_fields(&input, 4)?.into_iter();
    let (id, name, price, description) = (
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
    );

    Ok((
        parse_id(&id)?,
        parse_name(name)?,
        parse_price(&price)?,
        description,
    ))
}

fn parse_product_id(input: String) -> Result<(i64,), ParseError> {
    let fields = split_fields(&input, 1)?;
    Ok((parse_id(&fields[0])?,))
}
