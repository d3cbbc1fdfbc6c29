use crate::models::{Category, Part, Sale, Supplier};

/// Text fields a list's search box matches against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, needle_lower: &str) -> bool {
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// Case-insensitive substring filter. An empty term keeps every item, in order.
pub fn filter_items<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return items.to_vec();
    }

    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches(&needle))
        .cloned()
        .collect()
}

impl Searchable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(
            [&self.contact_person, &self.phone, &self.address]
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
        fields
    }
}

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<&str> {
        self.part_name.as_deref().into_iter().collect()
    }
}

impl Searchable for Part {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.category_name());
        fields
    }
}
