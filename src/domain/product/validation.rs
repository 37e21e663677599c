//! Product validation rules

use thiserror::Error;

use super::entity::NewProduct;

/// Errors that can occur during product validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProductValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title exceeds maximum length of {0} characters")]
    TitleTooLong(usize),

    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Description exceeds maximum length of {0} characters")]
    DescriptionTooLong(usize),

    #[error("Price must be greater than zero")]
    ZeroPrice,

    #[error("Image URL exceeds maximum length of {0} characters")]
    ImageUrlTooLong(usize),

    #[error("Image URL must end in .png, .jpeg or .jpg")]
    UnsupportedImageFormat,
}

pub const MAX_TITLE_LENGTH: usize = 256;
pub const MAX_DESCRIPTION_LENGTH: usize = 4000;
pub const MAX_IMAGE_URL_LENGTH: usize = 256;

const IMAGE_SUFFIXES: [&str; 3] = [".png", ".jpeg", ".jpg"];

/// Validate a normalized product draft.
pub fn validate_new_product(product: &NewProduct) -> Result<(), ProductValidationError> {
    let title_length = product.title.chars().count();

    if title_length == 0 {
        return Err(ProductValidationError::EmptyTitle);
    }

    if title_length > MAX_TITLE_LENGTH {
        return Err(ProductValidationError::TitleTooLong(MAX_TITLE_LENGTH));
    }

    let description_length = product.description.chars().count();

    if description_length == 0 {
        return Err(ProductValidationError::EmptyDescription);
    }

    if description_length > MAX_DESCRIPTION_LENGTH {
        return Err(ProductValidationError::DescriptionTooLong(
            MAX_DESCRIPTION_LENGTH,
        ));
    }

    if product.price == 0 {
        return Err(ProductValidationError::ZeroPrice);
    }

    if let Some(url) = &product.image_url {
        if url.chars().count() > MAX_IMAGE_URL_LENGTH {
            return Err(ProductValidationError::ImageUrlTooLong(
                MAX_IMAGE_URL_LENGTH,
            ));
        }

        if !IMAGE_SUFFIXES.iter().any(|suffix| url.ends_with(suffix)) {
            return Err(ProductValidationError::UnsupportedImageFormat);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewProduct {
        NewProduct {
            saler_id: 1,
            title: "bike".to_string(),
            description: "a slightly used bike".to_string(),
            image_url: None,
            price: 100,
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(validate_new_product(&draft()).is_ok());
    }

    #[test]
    fn test_empty_title() {
        let product = NewProduct {
            title: String::new(),
            ..draft()
        };
        assert_eq!(
            validate_new_product(&product),
            Err(ProductValidationError::EmptyTitle)
        );
    }

    #[test]
    fn test_title_too_long() {
        let product = NewProduct {
            title: "x".repeat(257),
            ..draft()
        };
        assert_eq!(
            validate_new_product(&product),
            Err(ProductValidationError::TitleTooLong(MAX_TITLE_LENGTH))
        );
    }

    #[test]
    fn test_description_too_long() {
        let product = NewProduct {
            description: "x".repeat(4001),
            ..draft()
        };
        assert_eq!(
            validate_new_product(&product),
            Err(ProductValidationError::DescriptionTooLong(
                MAX_DESCRIPTION_LENGTH
            ))
        );
    }

    #[test]
    fn test_zero_price() {
        let product = NewProduct {
            price: 0,
            ..draft()
        };
        assert_eq!(
            validate_new_product(&product),
            Err(ProductValidationError::ZeroPrice)
        );
    }

    #[test]
    fn test_image_url_suffixes() {
        for url in ["bike.png", "bike.jpeg", "bike.jpg"] {
            let product = NewProduct {
                image_url: Some(url.to_string()),
                ..draft()
            };
            assert!(validate_new_product(&product).is_ok(), "{url}");
        }

        let product = NewProduct {
            image_url: Some("bike.gif".to_string()),
            ..draft()
        };
        assert_eq!(
            validate_new_product(&product),
            Err(ProductValidationError::UnsupportedImageFormat)
        );
    }
}
