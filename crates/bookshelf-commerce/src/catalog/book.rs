//! Book and format types.

use crate::cart::CartItemInput;
use crate::error::CommerceError;
use crate::ids::{BookId, FormatId};
use crate::money::{Money, STORE_CURRENCY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical or digital edition of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
    Hardcover,
    Paperback,
    Ebook,
    Kindle,
}

impl BookFormat {
    /// All formats, in display order.
    pub const ALL: [BookFormat; 4] = [
        BookFormat::Hardcover,
        BookFormat::Paperback,
        BookFormat::Ebook,
        BookFormat::Kindle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookFormat::Hardcover => "hardcover",
            BookFormat::Paperback => "paperback",
            BookFormat::Ebook => "ebook",
            BookFormat::Kindle => "kindle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookFormat::Hardcover => "Hardcover",
            BookFormat::Paperback => "Paperback",
            BookFormat::Ebook => "eBook",
            BookFormat::Kindle => "Kindle",
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookFormat {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BookFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CommerceError::UnknownFormat(s.to_string()))
    }
}

/// A format a book is sold in, with its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatOffer {
    pub format: BookFormat,
    pub price: Money,
}

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Site-relative or absolute cover image reference.
    pub hero_image: String,
    pub formats: Vec<FormatOffer>,
}

impl Book {
    /// Find the offer for a format.
    pub fn offer(&self, format: BookFormat) -> Option<&FormatOffer> {
        self.formats.iter().find(|o| o.format == format)
    }

    /// Identifier of a line item for this book in `format`.
    pub fn format_id(&self, format: BookFormat) -> FormatId {
        FormatId::new(format!("{}-{}", self.id, format.as_str()))
    }

    /// Lowest price across formats.
    pub fn starting_price(&self) -> Option<Money> {
        self.formats
            .iter()
            .map(|o| o.price)
            .min_by_key(|p| p.amount_cents)
    }
}

/// The set of books on sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id.as_str() == id)
    }

    /// Build the add-to-cart payload for a book format at its catalog price.
    pub fn line_input(&self, book_id: &str, format: BookFormat) -> Result<CartItemInput, CommerceError> {
        let book = self
            .book(book_id)
            .ok_or_else(|| CommerceError::BookNotFound(book_id.to_string()))?;
        let offer = book
            .offer(format)
            .ok_or_else(|| CommerceError::FormatUnavailable {
                book: book.title.clone(),
                format: format.label().to_string(),
            })?;

        Ok(CartItemInput {
            product_id: book.id.clone(),
            format_id: book.format_id(format),
            title: book.title.clone(),
            author: book.author.clone(),
            unit_price: offer.price,
            image: book.hero_image.clone(),
            format,
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        fn offers(prices: [(BookFormat, i64); 4]) -> Vec<FormatOffer> {
            prices
                .into_iter()
                .map(|(format, cents)| FormatOffer {
                    format,
                    price: Money::new(cents, STORE_CURRENCY),
                })
                .collect()
        }

        Self::new(vec![
            Book {
                id: BookId::new("book1"),
                title: "You are not the only one".to_string(),
                author: "Judith Hobson".to_string(),
                hero_image: "/images/hero-book.jpg".to_string(),
                formats: offers([
                    (BookFormat::Hardcover, 2700),
                    (BookFormat::Paperback, 1900),
                    (BookFormat::Ebook, 999),
                    (BookFormat::Kindle, 999),
                ]),
            },
            Book {
                id: BookId::new("book2"),
                title: "An Old Little Lady".to_string(),
                author: "Judith Hobson".to_string(),
                hero_image: "/images/hero-book2.png".to_string(),
                formats: offers([
                    (BookFormat::Hardcover, 3200),
                    (BookFormat::Paperback, 2400),
                    (BookFormat::Ebook, 1299),
                    (BookFormat::Kindle, 1299),
                ]),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("paperback".parse::<BookFormat>().unwrap(), BookFormat::Paperback);
        assert_eq!("Kindle".parse::<BookFormat>().unwrap(), BookFormat::Kindle);
        assert!("audiobook".parse::<BookFormat>().is_err());
        assert_eq!(BookFormat::Ebook.label(), "eBook");
    }

    #[test]
    fn test_line_input_uses_catalog_price() {
        let catalog = Catalog::default();
        let input = catalog.line_input("book1", BookFormat::Paperback).unwrap();

        assert_eq!(input.format_id.as_str(), "book1-paperback");
        assert_eq!(input.unit_price.amount_cents, 1900);
        assert_eq!(input.author, "Judith Hobson");
        assert_eq!(input.image, "/images/hero-book.jpg");
    }

    #[test]
    fn test_line_input_unknown_book() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.line_input("book9", BookFormat::Paperback),
            Err(CommerceError::BookNotFound("book9".to_string()))
        );
    }

    #[test]
    fn test_line_input_unavailable_format() {
        let catalog = Catalog::new(vec![Book {
            id: BookId::new("zine"),
            title: "Zine".to_string(),
            author: "Anon".to_string(),
            hero_image: String::new(),
            formats: vec![FormatOffer {
                format: BookFormat::Ebook,
                price: Money::new(300, STORE_CURRENCY),
            }],
        }]);
        assert!(matches!(
            catalog.line_input("zine", BookFormat::Hardcover),
            Err(CommerceError::FormatUnavailable { .. })
        ));
    }

    #[test]
    fn test_starting_price() {
        let catalog = Catalog::default();
        let book = catalog.book("book2").unwrap();
        assert_eq!(book.starting_price().map(|m| m.amount_cents), Some(1299));
    }
}
