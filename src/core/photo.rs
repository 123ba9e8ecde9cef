//! Photo business logic - Site photos attached to orders.
//!
//! Only image paths are stored; the files themselves live outside the
//! database.

use crate::{
    entities::{Order, Photo, photo},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Attaches a photo to an order.
pub async fn add_photo(
    db: &DatabaseConnection,
    order_id: i64,
    image: String,
) -> Result<photo::Model> {
    if image.trim().is_empty() {
        return Err(Error::Validation {
            message: "Photo path cannot be empty".to_string(),
        });
    }

    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let model = photo::ActiveModel {
        order_id: Set(order_id),
        image: Set(image.trim().to_string()),
        uploaded_at: Set(Utc::now()),
        ..Default::default()
    };
    let photo = model.insert(db).await?;
    debug!(photo_id = photo.id, order_id, "Photo added");
    Ok(photo)
}

/// Retrieves the photos of an order, oldest first.
pub async fn get_photos_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<photo::Model>> {
    Photo::find()
        .filter(photo::Column::OrderId.eq(order_id))
        .order_by_asc(photo::Column::UploadedAt)
        .order_by_asc(photo::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes a photo from its order.
pub async fn delete_photo(db: &DatabaseConnection, photo_id: i64) -> Result<()> {
    let result = Photo::delete_by_id(photo_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::PhotoNotFound { id: photo_id });
    }
    Ok(())
}
