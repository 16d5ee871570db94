//! Resource library: resources, categories, subcategories and the derived
//! per-category counts.

use uuid::Uuid;

use api_types::resource::{
    CategoryInsert, CategoryPatch, CategoryRow, ResourceInsert, ResourcePatch, ResourceRow,
    SubcategoryInsert, SubcategoryPatch, SubcategoryRow,
};

use crate::{
    StoreError,
    collection::Collection,
    counts,
    error::ResultStore,
    gateway::TableGateway,
    records::{Category, Resource, ResourceKind, Subcategory},
};

/// An already-uploaded file backing a document/spreadsheet resource.
/// Uploading itself happens outside this layer; we only store the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileAttachment {
    pub path: String,
    pub size: i64,
    pub mime_type: String,
}

/// Form payload for creating or editing a resource.
#[derive(Clone, Debug, Default)]
pub struct ResourceDraft {
    pub title: String,
    pub kind: Option<ResourceKind>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub url: String,
    pub description: String,
    pub file: Option<FileAttachment>,
}

struct ValidDraft {
    title: String,
    kind: ResourceKind,
    category_id: Uuid,
    subcategory_id: Option<Uuid>,
    url: Option<String>,
    description: Option<String>,
    file: Option<FileAttachment>,
}

/// Local reflected store for the resources view.
#[derive(Debug, Default)]
pub struct ResourceLibrary {
    user_id: Uuid,
    pub categories: Collection<Category>,
    pub subcategories: Collection<Subcategory>,
    pub resources: Collection<Resource>,
}

impl ResourceLibrary {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            categories: Collection::new(),
            subcategories: Collection::new(),
            resources: Collection::new(),
        }
    }

    /// Replace all three collections with fresh remote reads, then recount.
    pub async fn refetch<G: TableGateway>(&mut self, gateway: &G) -> ResultStore<()> {
        let categories: Vec<CategoryRow> = gateway.select_all().await?;
        let subcategories: Vec<SubcategoryRow> = gateway.select_all().await?;
        let resources: Vec<ResourceRow> = gateway.select_all().await?;
        self.categories
            .replace_all(categories.into_iter().map(Category::from).collect());
        self.subcategories
            .replace_all(subcategories.into_iter().map(Subcategory::from).collect());
        self.resources
            .replace_all(resources.into_iter().map(Resource::from).collect());
        self.recount();
        Ok(())
    }

    pub async fn create_resource<G: TableGateway>(
        &mut self,
        gateway: &G,
        draft: &ResourceDraft,
    ) -> ResultStore<Uuid> {
        let valid = self.validate(draft)?;
        let row: ResourceRow = gateway
            .insert(&ResourceInsert {
                title: valid.title,
                kind: valid.kind.as_str().to_string(),
                category_id: valid.category_id,
                subcategory_id: valid.subcategory_id,
                url: valid.url,
                description: valid.description,
                file_path: valid.file.as_ref().map(|f| f.path.clone()),
                file_size: valid.file.as_ref().map(|f| f.size),
                file_type: valid.file.as_ref().map(|f| f.mime_type.clone()),
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.resources.merge(Resource::from(row));
        self.recount();
        Ok(id)
    }

    pub async fn update_resource<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        draft: &ResourceDraft,
    ) -> ResultStore<()> {
        let valid = self.validate(draft)?;
        let row: ResourceRow = gateway
            .update(
                id,
                &ResourcePatch {
                    title: valid.title,
                    kind: valid.kind.as_str().to_string(),
                    category_id: valid.category_id,
                    subcategory_id: valid.subcategory_id,
                    url: valid.url,
                    description: valid.description,
                },
            )
            .await?;
        self.resources.merge(Resource::from(row));
        self.recount();
        Ok(())
    }

    pub async fn delete_resource<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        gateway.delete::<ResourceRow>(id).await?;
        self.resources.remove(id);
        self.recount();
        Ok(())
    }

    pub async fn create_category<G: TableGateway>(
        &mut self,
        gateway: &G,
        name: &str,
    ) -> ResultStore<Uuid> {
        let name = required(name, "Category name is required")?;
        if self
            .categories
            .iter()
            .any(|category| category.name.eq_ignore_ascii_case(&name))
        {
            return Err(StoreError::Validation("Category already exists".to_string()));
        }
        let row: CategoryRow = gateway
            .insert(&CategoryInsert {
                name,
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.categories.merge(Category::from(row));
        self.recount();
        Ok(id)
    }

    pub async fn rename_category<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        name: &str,
    ) -> ResultStore<()> {
        let name = required(name, "Category name is required")?;
        let row: CategoryRow = gateway.update(id, &CategoryPatch { name }).await?;
        self.categories.merge(Category::from(row));
        self.recount();
        Ok(())
    }

    /// Refused while any resource still references the category.
    pub async fn delete_category<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        if counts::resources_in_category(self.resources.items(), id) > 0 {
            return Err(StoreError::InUse {
                entity: "category",
                dependents: "resources",
            });
        }
        gateway.delete::<CategoryRow>(id).await?;
        self.categories.remove(id);
        Ok(())
    }

    pub async fn create_subcategory<G: TableGateway>(
        &mut self,
        gateway: &G,
        name: &str,
        category_id: Uuid,
    ) -> ResultStore<Uuid> {
        let name = required(name, "Subcategory name is required")?;
        if !self.categories.contains(category_id) {
            return Err(StoreError::NotFound("category"));
        }
        let row: SubcategoryRow = gateway
            .insert(&SubcategoryInsert {
                name,
                category_id,
                user_id: self.user_id,
            })
            .await?;
        let id = row.id;
        self.subcategories.merge(Subcategory::from(row));
        Ok(id)
    }

    pub async fn update_subcategory<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
        name: &str,
        category_id: Uuid,
    ) -> ResultStore<()> {
        let name = required(name, "Subcategory name is required")?;
        let row: SubcategoryRow = gateway
            .update(id, &SubcategoryPatch { name, category_id })
            .await?;
        self.subcategories.merge(Subcategory::from(row));
        Ok(())
    }

    /// Refused while any resource still references the subcategory.
    pub async fn delete_subcategory<G: TableGateway>(
        &mut self,
        gateway: &G,
        id: Uuid,
    ) -> ResultStore<()> {
        if counts::resources_in_subcategory(self.resources.items(), id) > 0 {
            return Err(StoreError::InUse {
                entity: "subcategory",
                dependents: "resources",
            });
        }
        gateway.delete::<SubcategoryRow>(id).await?;
        self.subcategories.remove(id);
        Ok(())
    }

    /// Derived resource count for a category.
    pub fn count_for(&self, category_id: Uuid) -> usize {
        self.categories
            .get(category_id)
            .map(|category| category.count)
            .unwrap_or(0)
    }

    pub fn category_name(&self, id: Uuid) -> &str {
        self.categories
            .get(id)
            .map(|category| category.name.as_str())
            .unwrap_or("Uncategorized")
    }

    pub fn subcategory_name(&self, id: Uuid) -> Option<&str> {
        self.subcategories
            .get(id)
            .map(|subcategory| subcategory.name.as_str())
    }

    /// Subcategories offered for a category in filter bars and forms.
    pub fn subcategories_of(&self, category_id: Uuid) -> Vec<&Subcategory> {
        self.subcategories
            .iter()
            .filter(|subcategory| subcategory.category_id == category_id)
            .collect()
    }

    fn recount(&mut self) {
        // Collection has no slice-mut accessor; rebuild through replace_all
        // to keep the mutation surface small.
        let mut categories: Vec<Category> = self.categories.iter().cloned().collect();
        counts::recount(&mut categories, self.resources.items());
        self.categories.replace_all(categories);
    }

    fn validate(&self, draft: &ResourceDraft) -> ResultStore<ValidDraft> {
        let title = required(&draft.title, "Resource title is required")?;
        let kind = draft
            .kind
            .ok_or_else(|| StoreError::Validation("Resource type is required".to_string()))?;
        let category_id = draft
            .category_id
            .ok_or_else(|| StoreError::Validation("Category is required".to_string()))?;
        if !self.categories.contains(category_id) {
            return Err(StoreError::NotFound("category"));
        }
        if let Some(subcategory_id) = draft.subcategory_id {
            let Some(subcategory) = self.subcategories.get(subcategory_id) else {
                return Err(StoreError::NotFound("subcategory"));
            };
            if subcategory.category_id != category_id {
                return Err(StoreError::Validation(
                    "Subcategory belongs to a different category".to_string(),
                ));
            }
        }

        let url = non_empty(&draft.url);
        match kind {
            ResourceKind::Link => {
                if url.is_none() {
                    return Err(StoreError::Validation(
                        "A URL is required for link resources".to_string(),
                    ));
                }
            }
            ResourceKind::Document | ResourceKind::Spreadsheet => {
                if draft.file.is_none() {
                    return Err(StoreError::Validation(
                        "An uploaded file is required for document resources".to_string(),
                    ));
                }
            }
        }

        Ok(ValidDraft {
            title,
            kind,
            category_id,
            subcategory_id: draft.subcategory_id,
            url,
            description: non_empty(&draft.description),
            file: draft.file.clone(),
        })
    }
}

fn required(value: &str, message: &str) -> ResultStore<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachments_compare_as_total_equality() {
        fn total_eq<T: Eq>(_: &T) {}
        let attachment = FileAttachment {
            path: "files/algebra.pdf".to_string(),
            size: 2048,
            mime_type: "application/pdf".to_string(),
        };
        total_eq(&attachment);
        assert_eq!(attachment, attachment.clone());
    }
}
