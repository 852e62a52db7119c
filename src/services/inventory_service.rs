// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{
        category_label, is_predefined_category, CategorySummary, InventoryFilter, InventoryItem,
        InventoryItemInput, InventorySummary, SeedResult, StockMovement, StockMovementInput,
        StockMovementResult,
    },
};

// Catálogo de exemplo: (categoria, nome, quantidade, mínimo, unidade)
const SAMPLE_INVENTORY: &[(&str, &str, i64, i64, &str)] = &[
    // Peixes
    ("peixes", "Tilápia de 1kg", 50, 10, "kg"),
    ("peixes", "Tilápia de 1,5kg", 30, 8, "kg"),
    ("peixes", "Camarão 15g", 100, 20, "unidade"),
    ("peixes", "Camarão 30g", 80, 15, "unidade"),
    ("peixes", "Manjuba", 25, 5, "kg"),
    ("peixes", "Filé Branquinho/Tilápia", 40, 10, "kg"),
    ("peixes", "Salmão", 15, 3, "kg"),
    // Carnes
    ("carnes", "Contra Filé", 35, 8, "kg"),
    ("carnes", "Picanha", 20, 5, "kg"),
    ("carnes", "Fraldinha", 30, 7, "kg"),
    ("carnes", "Filé de Frango (Peito)", 45, 10, "kg"),
    ("carnes", "Frango a Passarinho", 25, 6, "kg"),
    ("carnes", "Barriga de Porco", 20, 5, "kg"),
    ("carnes", "Bacon Fatiado", 15, 3, "kg"),
    ("carnes", "Bacon Peça", 10, 2, "peça"),
    ("carnes", "Filé Mignon", 12, 3, "kg"),
    ("carnes", "Carneiro", 8, 2, "kg"),
    ("carnes", "Galinha Caipira", 15, 3, "unidade"),
    ("carnes", "Frango Desossado", 30, 8, "kg"),
    ("carnes", "Carne de Sol/Coxão Mole", 18, 4, "kg"),
    ("carnes", "Pé de Porco", 12, 3, "unidade"),
    ("carnes", "Orelha de Porco", 10, 2, "unidade"),
    ("carnes", "Rabo de Porco", 8, 2, "unidade"),
    // Frios/Congelados
    ("frios-congelados", "Queijo Mussarela", 25, 5, "kg"),
    ("frios-congelados", "Queijo Coalho", 20, 4, "kg"),
    ("frios-congelados", "Presunto", 15, 3, "kg"),
    ("frios-congelados", "Cheddar Bisnaga", 30, 8, "unidade"),
    ("frios-congelados", "Catupiry Bisnaga", 25, 6, "unidade"),
    ("frios-congelados", "Calabresa Pacote", 20, 5, "pacote"),
    ("frios-congelados", "Sorvete de Creme", 40, 10, "litro"),
    ("frios-congelados", "Croquete de Carne", 200, 50, "unidade"),
    ("frios-congelados", "Pastel de Carne", 150, 30, "unidade"),
    ("frios-congelados", "Pastel de Frango", 120, 25, "unidade"),
    ("frios-congelados", "Pastel de Queijo", 100, 20, "unidade"),
    ("frios-congelados", "Pastel de Camarão", 80, 15, "unidade"),
    ("frios-congelados", "Pastel Misto", 90, 18, "unidade"),
    ("frios-congelados", "Bolinho de Camarão", 100, 20, "unidade"),
    ("frios-congelados", "Bolinho de Carne de Sol", 80, 15, "unidade"),
    ("frios-congelados", "Bolinho de Bacalhau", 70, 12, "unidade"),
];

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // ---
    // Itens
    // ---

    pub async fn list_items(&self, filter: &InventoryFilter) -> Result<Vec<InventoryItem>, AppError> {
        let items = self.repo.list_items().await?;
        Ok(filter_items(items, filter))
    }

    pub async fn create_item(&self, input: InventoryItemInput) -> Result<InventoryItem, AppError> {
        let item = self.repo.create_item(&self.pool, &input).await?;
        tracing::info!("📦 Item '{}' cadastrado em '{}'", item.name, item.category);
        Ok(item)
    }

    pub async fn update_item(&self, id: Uuid, input: InventoryItemInput) -> Result<InventoryItem, AppError> {
        self.repo
            .update_item(id, &input)
            .await?
            .ok_or(AppError::InventoryItemNotFound)
    }

    // As movimentações do item saem junto (ON DELETE CASCADE)
    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_item(id).await? {
            return Err(AppError::InventoryItemNotFound);
        }
        Ok(())
    }

    pub async fn low_stock_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items = self.repo.list_items().await?;
        Ok(items.into_iter().filter(InventoryItem::is_low_stock).collect())
    }

    pub async fn summary(&self) -> Result<InventorySummary, AppError> {
        let items = self.repo.list_items().await?;
        Ok(build_summary(items))
    }

    // ---
    // Movimentações
    // ---

    /// Registra entrada ou saída e atualiza os contadores do item na mesma transação.
    /// Se o item não existir nada é gravado.
    pub async fn record_movement(&self, input: StockMovementInput) -> Result<StockMovementResult, AppError> {
        let mut tx = self.pool.begin().await?;

        let item = self.repo
            .apply_movement(&mut *tx, input.inventory_item_id, input.movement_type, input.quantity)
            .await?
            .ok_or(AppError::InventoryItemNotFound)?; // rollback no drop

        let movement = self.repo.record_movement(&mut *tx, &input).await?;

        tx.commit().await?;

        if item.is_low_stock() {
            tracing::warn!(
                "⚠️ Estoque baixo: '{}' com {} {} (mínimo {})",
                item.name, item.current_quantity, item.unit, item.min_stock_alert
            );
        }

        Ok(StockMovementResult { movement, item })
    }

    pub async fn list_movements(&self, item_id: Option<Uuid>) -> Result<Vec<StockMovement>, AppError> {
        self.repo.list_movements(item_id).await
    }

    // ---
    // Carga inicial
    // ---

    /// Carrega o catálogo de exemplo, só quando o estoque está vazio.
    pub async fn seed_sample_inventory(&self) -> Result<SeedResult, AppError> {
        let mut tx = self.pool.begin().await?;

        // Contagem e inserção sob a mesma trava: duas cargas simultâneas
        // não duplicam o catálogo
        self.repo.lock_items(&mut *tx).await?;
        if !needs_seed(self.repo.count_items(&mut *tx).await?) {
            tx.rollback().await?;
            tracing::info!("Estoque já possui itens, carga inicial ignorada.");
            return Ok(SeedResult { seeded: false, items_created: 0 });
        }

        for input in sample_inventory() {
            self.repo.create_item(&mut *tx, &input).await?;
        }
        tx.commit().await?;

        tracing::info!("✅ Carga inicial do estoque: {} itens", SAMPLE_INVENTORY.len());
        Ok(SeedResult { seeded: true, items_created: SAMPLE_INVENTORY.len() })
    }
}

// A carga de exemplo só entra num estoque vazio
pub fn needs_seed(existing_items: i64) -> bool {
    existing_items == 0
}

pub fn sample_inventory() -> Vec<InventoryItemInput> {
    SAMPLE_INVENTORY
        .iter()
        .map(|(category, name, quantity, min, unit)| InventoryItemInput {
            category: category.to_string(),
            name: name.to_string(),
            current_quantity: Decimal::from(*quantity),
            min_stock_alert: Decimal::from(*min),
            unit: unit.to_string(),
        })
        .collect()
}

/// Filtro da listagem.
///
/// Um slug predefinido seleciona só aquela categoria; qualquer outro valor
/// seleciona todos os itens de categorias personalizadas. A busca compara o
/// nome sem diferenciar maiúsculas.
pub fn filter_items(items: Vec<InventoryItem>, filter: &InventoryFilter) -> Vec<InventoryItem> {
    let category = filter.category.as_deref().filter(|c| !c.is_empty());
    let search = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    items
        .into_iter()
        .filter(|item| match category {
            Some(c) if is_predefined_category(c) => item.category == c,
            Some(_) => !is_predefined_category(&item.category),
            None => true,
        })
        .filter(|item| {
            search
                .as_ref()
                .is_none_or(|s| item.name.to_lowercase().contains(s.as_str()))
        })
        .collect()
}

// Uma linha por categoria presente no estoque, na ordem em que aparecem
pub fn build_summary(items: Vec<InventoryItem>) -> InventorySummary {
    let mut categories: Vec<CategorySummary> = Vec::new();

    for item in &items {
        let index = match categories.iter().position(|c| c.category == item.category) {
            Some(index) => index,
            None => {
                categories.push(CategorySummary {
                    category: item.category.clone(),
                    label: category_label(&item.category).to_string(),
                    total_stock: Decimal::ZERO,
                    low_stock_count: 0,
                    item_count: 0,
                });
                categories.len() - 1
            }
        };

        let summary = &mut categories[index];
        summary.total_stock += item.current_quantity;
        summary.item_count += 1;
        if item.is_low_stock() {
            summary.low_stock_count += 1;
        }
    }

    let total_items = items.len();
    let low_stock_items = items.into_iter().filter(InventoryItem::is_low_stock).collect();

    InventorySummary { categories, low_stock_items, total_items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn seed_only_fills_an_empty_inventory() {
        assert!(needs_seed(0));
        assert!(!needs_seed(1));
        assert!(!needs_seed(sample_inventory().len() as i64));
    }

    fn item(category: &str, name: &str, current: Decimal, min: Decimal) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            category: category.into(),
            name: name.into(),
            initial_quantity: current,
            entries: Decimal::ZERO,
            exits: Decimal::ZERO,
            current_quantity: current,
            min_stock_alert: min,
            unit: "kg".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stock() -> Vec<InventoryItem> {
        vec![
            item("carnes", "Picanha", dec!(20), dec!(5)),
            item("peixes", "Salmão", dec!(3), dec!(3)),
            item("peixes", "Tilápia de 1kg", dec!(50), dec!(10)),
            item("Temperos", "Sal grosso", dec!(1), dec!(2)),
            item("Utensílios", "Espeto", dec!(40), dec!(10)),
        ]
    }

    fn filter(category: Option<&str>, search: Option<&str>) -> InventoryFilter {
        InventoryFilter {
            category: category.map(String::from),
            search: search.map(String::from),
        }
    }

    fn names(items: &[InventoryItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn predefined_slug_selects_only_that_category() {
        let items = filter_items(stock(), &filter(Some("peixes"), None));
        assert_eq!(names(&items), vec!["Salmão", "Tilápia de 1kg"]);
    }

    #[test]
    fn unknown_category_selects_every_custom_category() {
        let items = filter_items(stock(), &filter(Some("Temperos"), None));
        assert_eq!(names(&items), vec!["Sal grosso", "Espeto"]);

        let items = filter_items(stock(), &filter(Some("qualquer-coisa"), None));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = filter_items(stock(), &filter(None, Some("TILÁ")));
        assert_eq!(names(&items), vec!["Tilápia de 1kg"]);

        let items = filter_items(stock(), &filter(Some("carnes"), Some("pic")));
        assert_eq!(names(&items), vec!["Picanha"]);

        let items = filter_items(stock(), &filter(None, Some("   ")));
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn low_stock_includes_items_at_the_minimum() {
        assert!(item("peixes", "Salmão", dec!(3), dec!(3)).is_low_stock());
        assert!(!item("peixes", "Salmão", dec!(3.5), dec!(3)).is_low_stock());
    }

    #[test]
    fn summary_groups_by_category_with_labels() {
        let summary = build_summary(stock());

        assert_eq!(summary.total_items, 5);
        assert_eq!(names(&summary.low_stock_items), vec!["Salmão", "Sal grosso"]);

        let peixes = summary.categories.iter().find(|c| c.category == "peixes").unwrap();
        assert_eq!(peixes.label, "Peixes");
        assert_eq!(peixes.total_stock, dec!(53));
        assert_eq!(peixes.item_count, 2);
        assert_eq!(peixes.low_stock_count, 1);

        let temperos = summary.categories.iter().find(|c| c.category == "Temperos").unwrap();
        assert_eq!(temperos.label, "Temperos");
        assert_eq!(summary.categories.len(), 4);
    }

    #[test]
    fn sample_catalogue_uses_known_categories_and_units() {
        let sample = sample_inventory();
        assert_eq!(sample.len(), 39);
        assert!(sample.iter().all(|i| is_predefined_category(&i.category)));
        assert!(sample.iter().all(|i| crate::models::inventory::STOCK_UNITS.contains(&i.unit.as_str())));
        assert!(sample.iter().all(|i| i.current_quantity > i.min_stock_alert));
    }
}
