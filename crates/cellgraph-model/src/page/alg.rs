//! Parent-chain walks.

use super::Page;
use crate::{ModelError, Result, is_reserved_id};
use rustc_hash::FxBuildHasher;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// The direct parent must exist. Further up, a missing ancestor ends the walk: it belongs to
/// some other cell, which [`Page::validate`] reports on its own.
pub(super) fn check_parent_chain(page: &Page, id: &str) -> Result<()> {
    let Some(start) = page.cell(id) else {
        return Ok(());
    };
    if !is_reserved_id(&start.parent) && !page.has_cell(&start.parent) {
        return Err(ModelError::UnknownParent {
            id: start.id.clone(),
            parent: start.parent.clone(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::default();
    seen.insert(start.id.as_str());
    let mut child = start;
    while !is_reserved_id(&child.parent) {
        let Some(next) = page.cell(&child.parent) else {
            return Ok(());
        };
        if !seen.insert(next.id.as_str()) {
            return Err(ModelError::ParentCycle { id: id.to_string() });
        }
        child = next;
    }
    Ok(())
}

pub(super) fn ancestors<'a>(page: &'a Page, id: &str) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = Vec::new();
    let Some(mut cur) = page.cell(id) else {
        return out;
    };
    let mut seen: HashSet<&str> = HashSet::default();
    seen.insert(cur.id.as_str());
    while let Some(parent) = page.cell(&cur.parent) {
        if !seen.insert(parent.id.as_str()) {
            break;
        }
        out.push(parent.id.as_str());
        cur = parent;
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::{Cell, Geometry, LAYER_ID, ModelError, Page};

    fn child(id: &str, parent: &str) -> Cell {
        Cell::vertex(id, "", "swimlane;", parent, Geometry::default())
    }

    #[test]
    fn chain_through_containers_is_accepted() {
        let mut page = Page::new("p", "d");
        page.insert(child("vpc", LAYER_ID)).unwrap();
        page.insert(child("az", "vpc")).unwrap();
        page.insert(child("subnet", "az")).unwrap();
        assert!(page.validate().is_ok());
        assert_eq!(page.ancestors("subnet"), vec!["az", "vpc"]);
    }

    #[test]
    fn missing_parent_is_reported_on_its_child() {
        let mut page = Page::new("p", "d");
        page.insert(child("az", "vpc")).unwrap();
        page.insert(child("subnet", "az")).unwrap();
        // `subnet` itself is fine; only `az` points at a missing cell.
        assert!(page.check_parent("subnet").is_ok());
        assert_eq!(
            page.check_parent("az").unwrap_err(),
            ModelError::UnknownParent {
                id: "az".into(),
                parent: "vpc".into()
            }
        );
        assert!(page.validate().is_err());
    }

    #[test]
    fn cycles_are_rejected() {
        let mut page = Page::new("p", "d");
        page.insert(child("a", "b")).unwrap();
        page.insert(child("b", "a")).unwrap();
        assert_eq!(
            page.check_parent("a").unwrap_err(),
            ModelError::ParentCycle { id: "a".into() }
        );

        let mut page = Page::new("p", "d");
        page.insert(child("self", "self")).unwrap();
        assert!(matches!(
            page.validate(),
            Err(ModelError::ParentCycle { .. })
        ));
        assert!(page.ancestors("self").is_empty());
    }
}
