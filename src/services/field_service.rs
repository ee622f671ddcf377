use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    cache::{CacheTag, Mutation},
    dto::fields::{
        CreateFieldRequest, DEFAULT_OPERATING_HOURS, FieldImageInput, FieldList,
        UpdateFieldRequest, clean_amenities, clean_optional,
    },
    entity::{
        field_amenities::{ActiveModel as AmenityActive, Column as AmenityCol, Entity as FieldAmenities, Model as AmenityModel},
        field_images::{ActiveModel as ImageActive, Column as ImageCol, Entity as FieldImages, Model as ImageModel},
        fields::{ActiveModel as FieldActive, Column as FieldCol, Entity as Fields, Model as FieldModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::{Field, FieldAmenity, FieldImage, FieldStatus},
    response::{ApiResponse, Meta},
    routes::params::{FieldQuery, FieldSortBy, SortOrder},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
struct FieldPage {
    items: Vec<Field>,
    total: i64,
}

pub async fn list_fields(
    state: &AppState,
    query: FieldQuery,
) -> AppResult<ApiResponse<FieldList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let scope = query.cache_scope();

    let result = state
        .cache
        .get_or_load(CacheTag::Fields, &scope, || async {
            let mut condition = Condition::all().add(FieldCol::Status.eq(FieldStatus::Active));

            if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                condition = condition.add(Expr::col(FieldCol::Name).ilike(like_pattern(search)));
            }
            if let Some(location) = query
                .location
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                condition =
                    condition.add(Expr::col(FieldCol::Location).ilike(like_pattern(location)));
            }

            let sort_by = query.sort_by.unwrap_or(FieldSortBy::CreatedAt);
            let (sort_col, default_order) = match sort_by {
                FieldSortBy::CreatedAt => (FieldCol::CreatedAt, SortOrder::Desc),
                FieldSortBy::Price => (FieldCol::PricePerBooking, SortOrder::Asc),
                FieldSortBy::Rating => (FieldCol::Rating, SortOrder::Desc),
            };

            let mut finder = Fields::find().filter(condition);
            finder = match query.sort_order.unwrap_or(default_order) {
                SortOrder::Asc => finder.order_by_asc(sort_col),
                SortOrder::Desc => finder.order_by_desc(sort_col),
            };

            let total = finder.clone().count(&state.orm).await? as i64;
            let models = finder
                .limit(limit as u64)
                .offset(offset as u64)
                .all(&state.orm)
                .await?;
            let items = with_details(&state.orm, models).await?;
            Ok(FieldPage { items, total })
        })
        .await?;

    let meta = Meta::new(page, limit, result.total);
    Ok(ApiResponse::success(
        "Fields",
        FieldList {
            items: result.items,
        },
        Some(meta),
    ))
}

pub async fn get_field(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Field>> {
    let field = state
        .cache
        .get_or_load(CacheTag::Field, &id.to_string(), || async {
            let model = Fields::find_by_id(id)
                .one(&state.orm)
                .await?
                .ok_or(AppError::NotFound)?;
            let mut fields = with_details(&state.orm, vec![model]).await?;
            fields.pop().ok_or(AppError::NotFound)
        })
        .await?;
    Ok(ApiResponse::item("Field", field))
}

pub async fn list_owner_fields(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<FieldList>> {
    ensure_owner(user)?;
    let items: Vec<Field> = state
        .cache
        .get_or_load(CacheTag::OwnerFields, &user.user_id.to_string(), || async {
            let models = Fields::find()
                .filter(FieldCol::OwnerId.eq(user.user_id))
                .order_by_desc(FieldCol::CreatedAt)
                .all(&state.orm)
                .await?;
            with_details(&state.orm, models).await
        })
        .await?;

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Owner fields",
        FieldList { items },
        Some(meta),
    ))
}

pub async fn create_field(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFieldRequest,
) -> AppResult<ApiResponse<Field>> {
    ensure_owner(user)?;
    payload.validate()?;

    let name = payload.name.trim().to_string();
    let location = payload.location.trim().to_string();
    if name.is_empty() || location.is_empty() {
        return Err(AppError::BadRequest("Field name and location are required".into()));
    }

    let txn = state.orm.begin().await?;
    let field = FieldActive {
        id: Set(Uuid::new_v4()),
        owner_id: Set(user.user_id),
        name: Set(name),
        location: Set(location),
        address: Set(clean_optional(payload.address)),
        description: Set(clean_optional(payload.description)),
        price_per_booking: Set(payload.price_per_booking.round_dp(2)),
        operating_hours: Set(clean_optional(payload.operating_hours)
            .unwrap_or_else(|| DEFAULT_OPERATING_HOURS.to_string())),
        rating: NotSet,
        status: Set(FieldStatus::Active),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    replace_images(&txn, field.id, payload.images).await?;
    replace_amenities(&txn, field.id, payload.amenities).await?;
    txn.commit().await?;

    state.cache.invalidate(Mutation::FieldCreated);
    tracing::info!(field_id = %field.id, owner_id = %user.user_id, "field created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "field_create",
        "fields",
        serde_json::json!({ "field_id": field.id }),
    )
    .await;

    let mut fields = with_details(&state.orm, vec![field]).await?;
    let field = fields.pop().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::item("Field created", field))
}

pub async fn update_field(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateFieldRequest,
) -> AppResult<ApiResponse<Field>> {
    ensure_owner(user)?;
    payload.validate()?;

    let txn = state.orm.begin().await?;
    let existing = find_owned_field(&txn, user, id).await?;

    let mut active: FieldActive = existing.into();
    if let Some(name) = payload.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        active.name = Set(name);
    }
    if let Some(location) = payload
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
    {
        active.location = Set(location);
    }
    if payload.address.is_some() {
        active.address = Set(clean_optional(payload.address));
    }
    if payload.description.is_some() {
        active.description = Set(clean_optional(payload.description));
    }
    if let Some(price) = payload.price_per_booking {
        active.price_per_booking = Set(price.round_dp(2));
    }
    if let Some(hours) = clean_optional(payload.operating_hours) {
        active.operating_hours = Set(hours);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());
    let field = active.update(&txn).await?;

    if let Some(images) = payload.images {
        replace_images(&txn, field.id, images).await?;
    }
    if let Some(amenities) = payload.amenities {
        replace_amenities(&txn, field.id, amenities).await?;
    }
    txn.commit().await?;

    state.cache.invalidate(Mutation::FieldUpdated);
    tracing::info!(field_id = %field.id, "field updated");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "field_update",
        "fields",
        serde_json::json!({ "field_id": field.id }),
    )
    .await;

    let mut fields = with_details(&state.orm, vec![field]).await?;
    let field = fields.pop().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::item("Updated", field))
}

pub async fn delete_field(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_owner(user)?;
    find_owned_field(&state.orm, user, id).await?;

    let result = Fields::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    state.cache.invalidate(Mutation::FieldDeleted);
    tracing::info!(field_id = %id, "field deleted");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "field_delete",
        "fields",
        serde_json::json!({ "field_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Load a field the caller owns. Other owners' fields read as missing.
pub(crate) async fn find_owned_field<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<FieldModel> {
    let field = Fields::find()
        .filter(
            Condition::all()
                .add(FieldCol::Id.eq(id))
                .add(FieldCol::OwnerId.eq(user.user_id)),
        )
        .one(conn)
        .await?;
    field.ok_or(AppError::NotFound)
}

/// Attach images and amenities to each field, keeping the input order.
pub(crate) async fn with_details<C: ConnectionTrait>(
    conn: &C,
    models: Vec<FieldModel>,
) -> AppResult<Vec<Field>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

    let mut images: HashMap<Uuid, Vec<FieldImage>> = HashMap::new();
    for image in FieldImages::find()
        .filter(ImageCol::FieldId.is_in(ids.clone()))
        .order_by_asc(ImageCol::Position)
        .all(conn)
        .await?
    {
        images
            .entry(image.field_id)
            .or_default()
            .push(image_from_entity(image));
    }

    let mut amenities: HashMap<Uuid, Vec<FieldAmenity>> = HashMap::new();
    for amenity in FieldAmenities::find()
        .filter(AmenityCol::FieldId.is_in(ids))
        .order_by_asc(AmenityCol::Amenity)
        .all(conn)
        .await?
    {
        amenities
            .entry(amenity.field_id)
            .or_default()
            .push(amenity_from_entity(amenity));
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let id = model.id;
            field_from_entity(
                model,
                images.remove(&id).unwrap_or_default(),
                amenities.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}

async fn replace_images<C: ConnectionTrait>(
    conn: &C,
    field_id: Uuid,
    images: Vec<FieldImageInput>,
) -> AppResult<()> {
    FieldImages::delete_many()
        .filter(ImageCol::FieldId.eq(field_id))
        .exec(conn)
        .await?;

    let primary = images.iter().position(|i| i.is_primary).unwrap_or(0);
    for (position, image) in images.into_iter().enumerate() {
        ImageActive {
            id: Set(Uuid::new_v4()),
            field_id: Set(field_id),
            image_url: Set(image.image_url.trim().to_string()),
            is_primary: Set(position == primary),
            position: Set(position as i32),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn replace_amenities<C: ConnectionTrait>(
    conn: &C,
    field_id: Uuid,
    amenities: Vec<String>,
) -> AppResult<()> {
    FieldAmenities::delete_many()
        .filter(AmenityCol::FieldId.eq(field_id))
        .exec(conn)
        .await?;

    for amenity in clean_amenities(amenities) {
        AmenityActive {
            id: Set(Uuid::new_v4()),
            field_id: Set(field_id),
            amenity: Set(amenity),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn field_from_entity(
    model: FieldModel,
    images: Vec<FieldImage>,
    amenities: Vec<FieldAmenity>,
) -> Field {
    Field {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        location: model.location,
        address: model.address,
        description: model.description,
        price_per_booking: model.price_per_booking,
        operating_hours: model.operating_hours,
        rating: model.rating,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        images,
        amenities,
    }
}

fn image_from_entity(model: ImageModel) -> FieldImage {
    FieldImage {
        id: model.id,
        image_url: model.image_url,
        is_primary: model.is_primary,
    }
}

fn amenity_from_entity(model: AmenityModel) -> FieldAmenity {
    FieldAmenity {
        id: model.id,
        amenity: model.amenity,
    }
}
