//! Database query functions

use crate::models::*;
use crate::page::Page;
use crate::schema::Database;
use crate::Result;

const COMPONENT_COLUMNS: &str = "id, code, description, image, part_number, category, maker, \
     stock, price, datetime(created_at) as created_at, datetime(updated_at) as updated_at";

impl Database {
    // ==================== Components: writes ====================

    /// Create a new component and return the stored row
    pub async fn create_component(&self, new: NewComponent) -> Result<Component> {
        let id = sqlx::query(
            "INSERT INTO components (code, description, image, part_number, category, maker, stock, price)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.code)
        .bind(&new.description)
        .bind(&new.image)
        .bind(&new.part_number)
        .bind(&new.category)
        .bind(&new.maker)
        .bind(new.stock)
        .bind(new.price)
        .execute(self.pool())
        .await
        .map_err(|e| self.classify(e))?
        .last_insert_rowid();

        let component = self.get_component_by_id(id).await?;
        // The row was just inserted on this pool, so it must be present.
        component.ok_or(crate::QueryError::Internal(sqlx::Error::RowNotFound))
    }

    /// Partially update a component. Absent fields keep their stored value.
    /// Returns `None` when the id matches no row.
    pub async fn update_component(
        &self,
        id: i64,
        fields: &UpdateComponent,
    ) -> Result<Option<Component>> {
        let affected = sqlx::query(
            "UPDATE components SET
                code = COALESCE(?, code),
                description = COALESCE(?, description),
                image = COALESCE(?, image),
                part_number = COALESCE(?, part_number),
                category = COALESCE(?, category),
                maker = COALESCE(?, maker),
                stock = COALESCE(?, stock),
                price = COALESCE(?, price),
                updated_at = datetime('now')
             WHERE id = ?",
        )
        .bind(&fields.code)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(&fields.part_number)
        .bind(&fields.category)
        .bind(&fields.maker)
        .bind(fields.stock)
        .bind(fields.price)
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| self.classify(e))?
        .rows_affected();

        if affected == 0 {
            return Ok(None);
        }
        self.get_component_by_id(id).await
    }

    /// Delete a component (detail and transistor rows cascade).
    /// Returns the deleted id, or `None` when it matched no row.
    pub async fn delete_component(&self, id: i64) -> Result<Option<i64>> {
        let affected = sqlx::query("DELETE FROM components WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| self.classify(e))?
            .rows_affected();

        Ok((affected > 0).then_some(id))
    }

    // ==================== Components: reads ====================

    /// Get a component by ID
    pub async fn get_component_by_id(&self, id: i64) -> Result<Option<Component>> {
        let sql = format!("SELECT {COMPONENT_COLUMNS} FROM components WHERE id = ?");
        sqlx::query_as::<_, Component>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| self.classify(e))
    }

    /// Get one page of components
    pub async fn list_components(&self, page: &Page) -> Result<Vec<Component>> {
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components ORDER BY {} LIMIT ? OFFSET ?",
            page.order_clause()?
        );
        sqlx::query_as::<_, Component>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(|e| self.classify(e))
    }

    /// Get one page of components matching any supplied attribute filter
    pub async fn list_components_by_attributes(
        &self,
        page: &Page,
        filter: &AttributeFilter,
    ) -> Result<Vec<Component>> {
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components
             WHERE code LIKE ?
               AND COALESCE(description, '') LIKE ?
               AND COALESCE(image, '') LIKE ?
               AND COALESCE(part_number, '') LIKE ?
               AND COALESCE(category, '') LIKE ?
               AND COALESCE(maker, '') LIKE ?
             ORDER BY {} LIMIT ? OFFSET ?",
            page.order_clause()?
        );
        sqlx::query_as::<_, Component>(&sql)
            .bind(like(filter.code.as_deref()))
            .bind(like(filter.description.as_deref()))
            .bind(like(filter.image.as_deref()))
            .bind(like(filter.part_number.as_deref()))
            .bind(like(filter.category.as_deref()))
            .bind(like(filter.maker.as_deref()))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(|e| self.classify(e))
    }

    /// Get one page of components whose code matches
    pub async fn list_components_by_code(&self, page: &Page, code: &str) -> Result<Vec<Component>> {
        self.list_where_like(page, "code", code).await
    }

    /// Get one page of components whose image reference matches
    pub async fn list_components_by_image(
        &self,
        page: &Page,
        image: &str,
    ) -> Result<Vec<Component>> {
        self.list_where_like(page, "image", image).await
    }

    /// Get one page of components whose part number matches
    pub async fn list_components_by_part_number(
        &self,
        page: &Page,
        part_number: &str,
    ) -> Result<Vec<Component>> {
        self.list_where_like(page, "part_number", part_number).await
    }

    /// Get one page of components whose description matches
    pub async fn list_components_by_description(
        &self,
        page: &Page,
        description: &str,
    ) -> Result<Vec<Component>> {
        self.list_where_like(page, "description", description).await
    }

    /// Get one page of components matching both category and maker
    pub async fn list_components_by_category_maker(
        &self,
        page: &Page,
        category: &str,
        maker: &str,
    ) -> Result<Vec<Component>> {
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components
             WHERE COALESCE(category, '') LIKE ? AND COALESCE(maker, '') LIKE ?
             ORDER BY {} LIMIT ? OFFSET ?",
            page.order_clause()?
        );
        sqlx::query_as::<_, Component>(&sql)
            .bind(like(Some(category)))
            .bind(like(Some(maker)))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(|e| self.classify(e))
    }

    /// Get one page of components with exactly the given stock
    pub async fn list_components_by_stock(&self, page: &Page, stock: i64) -> Result<Vec<Component>> {
        self.list_where_numeric(page, "stock = ?", stock, None).await
    }

    /// Get one page of components with stock at or below the given maximum
    pub async fn list_components_by_stock_max(
        &self,
        page: &Page,
        max: i64,
    ) -> Result<Vec<Component>> {
        self.list_where_numeric(page, "stock <= ?", max, None).await
    }

    /// Get one page of components with stock inside the given range
    pub async fn list_components_by_stock_range(
        &self,
        page: &Page,
        min: i64,
        max: i64,
    ) -> Result<Vec<Component>> {
        self.list_where_numeric(page, "stock >= ? AND stock <= ?", min, Some(max))
            .await
    }

    /// Get one page of components with exactly the given price
    pub async fn list_components_by_price(&self, page: &Page, price: f64) -> Result<Vec<Component>> {
        self.list_where_numeric(page, "price = ?", price, None).await
    }

    /// Get one page of components priced at or below the given maximum
    pub async fn list_components_by_price_max(
        &self,
        page: &Page,
        max: f64,
    ) -> Result<Vec<Component>> {
        self.list_where_numeric(page, "price <= ?", max, None).await
    }

    /// Get one page of components priced inside the given range
    pub async fn list_components_by_price_range(
        &self,
        page: &Page,
        min: f64,
        max: f64,
    ) -> Result<Vec<Component>> {
        self.list_where_numeric(page, "price >= ? AND price <= ?", min, Some(max))
            .await
    }

    async fn list_where_like(
        &self,
        page: &Page,
        column: &str,
        value: &str,
    ) -> Result<Vec<Component>> {
        // `column` is only ever a literal from the callers above.
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components
             WHERE COALESCE({column}, '') LIKE ?
             ORDER BY {} LIMIT ? OFFSET ?",
            page.order_clause()?
        );
        sqlx::query_as::<_, Component>(&sql)
            .bind(like(Some(value)))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(|e| self.classify(e))
    }

    async fn list_where_numeric<V>(
        &self,
        page: &Page,
        predicate: &str,
        first: V,
        second: Option<V>,
    ) -> Result<Vec<Component>>
    where
        V: for<'q> sqlx::Encode<'q, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite> + Send + 'static,
    {
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components
             WHERE {predicate}
             ORDER BY {} LIMIT ? OFFSET ?",
            page.order_clause()?
        );
        let mut query = sqlx::query_as::<_, Component>(&sql).bind(first);
        if let Some(second) = second {
            query = query.bind(second);
        }
        query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(|e| self.classify(e))
    }

    // ==================== Join-breadth reads ====================

    /// Get one page of components joined with their detail records
    pub async fn list_components_with_details(
        &self,
        page: &Page,
    ) -> Result<Vec<ComponentWithDetails>> {
        let components = self.list_components(page).await?;
        let mut out = Vec::with_capacity(components.len());
        for component in components {
            let details = self.details_for(component.id).await?;
            out.push(ComponentWithDetails { component, details });
        }
        Ok(out)
    }

    /// Get one page of components joined with their bipolar-transistor records
    pub async fn list_components_with_transistors(
        &self,
        page: &Page,
    ) -> Result<Vec<ComponentWithTransistors>> {
        let components = self.list_components(page).await?;
        let mut out = Vec::with_capacity(components.len());
        for component in components {
            let bipolar_transistors = self.transistors_for(component.id).await?;
            out.push(ComponentWithTransistors {
                component,
                bipolar_transistors,
            });
        }
        Ok(out)
    }

    /// Get one page of components joined with every related model
    pub async fn list_components_full(&self, page: &Page) -> Result<Vec<ComponentFull>> {
        let components = self.list_components(page).await?;
        let mut out = Vec::with_capacity(components.len());
        for component in components {
            let details = self.details_for(component.id).await?;
            let bipolar_transistors = self.transistors_for(component.id).await?;
            out.push(ComponentFull {
                component,
                details,
                bipolar_transistors,
            });
        }
        Ok(out)
    }

    /// Detail records belonging to a component
    pub async fn details_for(&self, component_id: i64) -> Result<Vec<ComponentDetail>> {
        sqlx::query_as::<_, ComponentDetail>(
            "SELECT id, component_id, datasheet, material, length, width, weight
             FROM component_details WHERE component_id = ? ORDER BY id",
        )
        .bind(component_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| self.classify(e))
    }

    /// Bipolar-transistor records belonging to a component
    pub async fn transistors_for(&self, component_id: i64) -> Result<Vec<BipolarTransistor>> {
        sqlx::query_as::<_, BipolarTransistor>(
            "SELECT id, component_id, transistor_type, collector_emitter_voltage,
                    collector_base_voltage, emitter_base_voltage, collector_current,
                    power_dissipation
             FROM bipolar_transistors WHERE component_id = ? ORDER BY id",
        )
        .bind(component_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| self.classify(e))
    }

    // ==================== Auxiliary-record writes ====================

    /// Attach a detail record to a component.
    /// Returns `None` when the parent component does not exist.
    pub async fn create_component_detail(
        &self,
        new: NewComponentDetail,
    ) -> Result<Option<ComponentDetail>> {
        if self.get_component_by_id(new.component_id).await?.is_none() {
            return Ok(None);
        }

        let id = sqlx::query(
            "INSERT INTO component_details (component_id, datasheet, material, length, width, weight)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new.component_id)
        .bind(&new.datasheet)
        .bind(&new.material)
        .bind(new.length)
        .bind(new.width)
        .bind(new.weight)
        .execute(self.pool())
        .await
        .map_err(|e| self.classify(e))?
        .last_insert_rowid();

        sqlx::query_as::<_, ComponentDetail>(
            "SELECT id, component_id, datasheet, material, length, width, weight
             FROM component_details WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| self.classify(e))
    }

    /// Attach a bipolar-transistor record to a component.
    /// Returns `None` when the parent component does not exist.
    pub async fn create_bipolar_transistor(
        &self,
        new: NewBipolarTransistor,
    ) -> Result<Option<BipolarTransistor>> {
        if self.get_component_by_id(new.component_id).await?.is_none() {
            return Ok(None);
        }

        let id = sqlx::query(
            "INSERT INTO bipolar_transistors
             (component_id, transistor_type, collector_emitter_voltage,
              collector_base_voltage, emitter_base_voltage, collector_current,
              power_dissipation)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.component_id)
        .bind(&new.transistor_type)
        .bind(new.collector_emitter_voltage)
        .bind(new.collector_base_voltage)
        .bind(new.emitter_base_voltage)
        .bind(new.collector_current)
        .bind(new.power_dissipation)
        .execute(self.pool())
        .await
        .map_err(|e| self.classify(e))?
        .last_insert_rowid();

        sqlx::query_as::<_, BipolarTransistor>(
            "SELECT id, component_id, transistor_type, collector_emitter_voltage,
                    collector_base_voltage, emitter_base_voltage, collector_current,
                    power_dissipation
             FROM bipolar_transistors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| self.classify(e))
    }
}

fn like(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("%{}%", v),
        None => "%".to_string(),
    }
}
