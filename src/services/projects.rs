use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    models::{
        project::{Project, ProjectId, ProjectInput, ValidationError},
        sort::{SortConfig, SortDirection, SortKey, sort_projects},
    },
    services::events::{StoreEvent, Subscriber},
    storage::{Seed, Storage, StorageError, load_or_seed, load_sort_or_default},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Project '{0}' not found")]
    NotFound(ProjectId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Project '{0}' not found")]
    NotFound(String),

    #[error("Project name is ambiguous. Multiple projects found: {}", .0.join(", "))]
    Ambiguous(Vec<String>),
}

/// Result of a mutation that was applied in memory. `warning` carries the
/// persistence failure, if the write-through did not make it to storage.
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub warning: Option<StorageError>,
}

impl<T> Applied<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Owns the ordered project collection for one session.
///
/// Every mutation takes `&mut self`, writes the whole collection through to
/// `storage` and then notifies subscribers. A failed write is returned as a
/// warning; the in-memory change stays.
pub struct ProjectStore<S: Storage> {
    projects: Vec<Project>,
    storage: S,
    sort: Option<SortConfig>,
    editing: Option<ProjectId>,
    subscribers: Vec<Subscriber>,
    /// Set while storage may not hold the current collection
    dirty: bool,
    /// Set while storage may not hold the current sort
    sort_dirty: bool,
}

impl<S: Storage> ProjectStore<S> {
    /// Starts a session from whatever `storage` holds, or from `seed`. The
    /// sort saved by an earlier session is restored.
    pub fn open(storage: S, seed: Seed) -> Result<Self, ValidationError> {
        let loaded = load_or_seed(&storage, seed)?;
        let sort = load_sort_or_default(&storage);
        Ok(Self {
            projects: loaded.projects,
            storage,
            sort,
            editing: None,
            subscribers: Vec::new(),
            dirty: loaded.seeded,
            sort_dirty: false,
        })
    }

    /// Ends the session. Writes only what storage is behind on: a collection
    /// that came from the seed, or a write-through that failed earlier.
    pub fn close(self) -> Result<(), StorageError> {
        if !self.dirty && !self.sort_dirty {
            debug!("Nothing unsaved, closing without a write");
            return Ok(());
        }
        if self.dirty {
            self.storage.save(&self.projects)?;
        }
        if self.sort_dirty {
            self.storage.save_sort(self.sort)?;
        }
        Ok(())
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&StoreEvent, &[Project]) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Collection in its authoritative order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn sort_config(&self) -> Option<SortConfig> {
        self.sort
    }

    pub fn create(&mut self, input: ProjectInput) -> Result<Applied<Project>, StoreError> {
        let fields = input.validate()?;
        let project = Project::new(self.fresh_id(), fields);
        debug!(id = %project.id, name = %project.name, "Creating project");

        self.projects.push(project.clone());

        let warning = self.commit(StoreEvent::created(&project));
        Ok(Applied {
            value: project,
            warning,
        })
    }

    /// Replaces every editable field of `id`. Position and completion flag are
    /// kept.
    pub fn update(
        &mut self,
        id: &ProjectId,
        input: ProjectInput,
    ) -> Result<Applied<Project>, StoreError> {
        let index = self.position(id)?;
        let fields = input.validate()?;
        let updated = self.projects[index].replaced_with(fields);
        debug!(id = %id, name = %updated.name, "Updating project");

        self.projects[index] = updated.clone();
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }

        let warning = self.commit(StoreEvent::updated(&updated));
        Ok(Applied {
            value: updated,
            warning,
        })
    }

    /// Removes `id` and returns the removed project.
    pub fn delete(&mut self, id: &ProjectId) -> Result<Applied<Project>, StoreError> {
        let index = self.position(id)?;
        let removed = self.projects.remove(index);
        debug!(id = %id, name = %removed.name, "Deleting project");

        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }

        let warning = self.commit(StoreEvent::deleted(&removed));
        Ok(Applied {
            value: removed,
            warning,
        })
    }

    pub fn toggle_complete(&mut self, id: &ProjectId) -> Result<Applied<Project>, StoreError> {
        let index = self.position(id)?;
        let toggled = {
            let current = &self.projects[index];
            current.with_completed(!current.is_completed)
        };
        debug!(id = %id, is_completed = toggled.is_completed, "Toggling project");

        self.projects[index] = toggled.clone();

        let warning = self.commit(StoreEvent::toggled(&toggled));
        Ok(Applied {
            value: toggled,
            warning,
        })
    }

    /// Stable re-order of the whole collection. The sort is saved so the
    /// next session starts from it.
    pub fn sort_by(&mut self, key: SortKey, direction: SortDirection) -> Applied<()> {
        sort_projects(&mut self.projects, key, direction);
        let config = SortConfig { key, direction };
        self.sort = Some(config);
        debug!(%key, %direction, "Sorted projects");

        let warning = self.commit(StoreEvent::Sorted(config));
        let sort_warning = match self.storage.save_sort(self.sort) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Failed to persist sort, keeping it for this session");
                Some(e)
            }
        };
        self.sort_dirty = sort_warning.is_some();
        Applied {
            value: (),
            warning: warning.or(sort_warning),
        }
    }

    /// Sorts by `key`, flipping to descending when the collection is already
    /// sorted ascending by that key.
    pub fn toggle_sort(&mut self, key: SortKey) -> Applied<SortDirection> {
        let direction = SortConfig::next_direction(self.sort, key);
        let applied = self.sort_by(key, direction);
        Applied {
            value: direction,
            warning: applied.warning,
        }
    }

    pub fn list_ongoing(&self) -> Vec<&Project> {
        self.view().into_iter().filter(|p| !p.is_completed).collect()
    }

    pub fn list_completed(&self) -> Vec<&Project> {
        self.view().into_iter().filter(|p| p.is_completed).collect()
    }

    /// Marks `id` as the project being edited.
    pub fn begin_edit(&mut self, id: &ProjectId) -> Result<&Project, StoreError> {
        let index = self.position(id)?;
        self.editing = Some(id.clone());
        Ok(&self.projects[index])
    }

    pub fn editing(&self) -> Option<&Project> {
        self.editing.as_ref().and_then(|id| self.get(id))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Finds a project by exact id, unique id prefix or name fragment.
    pub fn resolve(&self, query: &str) -> Result<&Project, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::NotFound(query.to_string()));
        }

        if let Some(project) = self.projects.iter().find(|p| p.id.as_str() == query) {
            return Ok(project);
        }

        let by_prefix: Vec<_> = self
            .projects
            .iter()
            .filter(|p| p.id.as_str().starts_with(query))
            .collect();
        if by_prefix.len() == 1 {
            return Ok(by_prefix[0]);
        }

        let needle = query.to_lowercase();
        let matching_projects: Vec<_> = self
            .projects
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect();

        match matching_projects.len() {
            1 => Ok(matching_projects[0]),
            0 if by_prefix.is_empty() => Err(LookupError::NotFound(query.to_string())),
            0 => Err(LookupError::Ambiguous(
                by_prefix.iter().map(|p| p.name.clone()).collect(),
            )),
            _ => Err(LookupError::Ambiguous(
                matching_projects.iter().map(|p| p.name.clone()).collect(),
            )),
        }
    }

    /// Order used for listings: the collection order once a sort was
    /// requested, ascending deadline before that.
    fn view(&self) -> Vec<&Project> {
        let mut view: Vec<&Project> = self.projects.iter().collect();
        if self.sort.is_none() {
            view.sort_by(|a, b| a.deadline.cmp(&b.deadline));
        }
        view
    }

    fn position(&self, id: &ProjectId) -> Result<usize, StoreError> {
        self.projects
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn fresh_id(&self) -> ProjectId {
        loop {
            let id = ProjectId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, event: StoreEvent) -> Option<StorageError> {
        let warning = match self.storage.save(&self.projects) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Failed to persist projects, keeping changes in memory");
                Some(e)
            }
        };
        self.dirty = warning.is_some();

        for subscriber in self.subscribers.iter_mut() {
            subscriber(&event, &self.projects);
        }

        warning
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        path::PathBuf,
        rc::Rc,
    };

    use super::*;
    use crate::storage::memory::MemoryStorage;

    fn input(name: &str, deadline: &str) -> ProjectInput {
        ProjectInput {
            name: name.to_string(),
            deadline: deadline.to_string(),
            client: format!("{} client", name),
            description: format!("{} description", name),
            notes: None,
            drive_link: None,
        }
    }

    fn empty_store() -> ProjectStore<MemoryStorage> {
        ProjectStore::open(MemoryStorage::default(), Seed::Empty).unwrap()
    }

    fn create(store: &mut ProjectStore<MemoryStorage>, name: &str, deadline: &str) -> ProjectId {
        let applied = store.create(input(name, deadline)).unwrap();
        assert!(applied.warning.is_none());
        applied.value.id
    }

    fn names(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.name.clone()).collect()
    }

    fn collection_names<S: Storage>(store: &ProjectStore<S>) -> Vec<String> {
        store.projects().iter().map(|p| p.name.clone()).collect()
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn load(&self) -> Result<Option<Vec<Project>>, StorageError> {
            Ok(None)
        }

        fn save(&self, _projects: &[Project]) -> Result<(), StorageError> {
            Err(read_only())
        }

        fn load_sort(&self) -> Result<Option<SortConfig>, StorageError> {
            Ok(None)
        }

        fn save_sort(&self, _sort: Option<SortConfig>) -> Result<(), StorageError> {
            Err(read_only())
        }
    }

    fn read_only() -> StorageError {
        StorageError::SaveFailed {
            path: PathBuf::from("<read-only>"),
            source: std::io::Error::other("disk full"),
        }
    }

    /// Memory storage that counts collection writes.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        saves: Cell<usize>,
    }

    impl Storage for CountingStorage {
        fn load(&self) -> Result<Option<Vec<Project>>, StorageError> {
            self.inner.load()
        }

        fn save(&self, projects: &[Project]) -> Result<(), StorageError> {
            self.saves.set(self.saves.get() + 1);
            self.inner.save(projects)
        }

        fn load_sort(&self) -> Result<Option<SortConfig>, StorageError> {
            self.inner.load_sort()
        }

        fn save_sort(&self, sort: Option<SortConfig>) -> Result<(), StorageError> {
            self.inner.save_sort(sort)
        }
    }

    #[test]
    fn test_default_view_orders_by_deadline() {
        let mut store = empty_store();
        let _a = create(&mut store, "A", "2024-05-15");
        let b = create(&mut store, "B", "2024-04-30");
        let _c = create(&mut store, "C", "2024-06-01");

        assert_eq!(collection_names(&store), vec!["A", "B", "C"]);
        assert_eq!(names(&store.list_ongoing()), vec!["B", "A", "C"]);

        store.toggle_complete(&b).unwrap();
        assert_eq!(names(&store.list_completed()), vec!["B"]);
        assert_eq!(names(&store.list_ongoing()), vec!["A", "C"]);
    }

    #[test]
    fn test_create_assigns_unique_ids_and_appends() {
        let mut store = empty_store();
        let first = store.create(input("First", "2024-01-10")).unwrap().value;
        let second = store.create(input("Second", "2024-01-01")).unwrap().value;

        assert_ne!(first.id, second.id);
        assert!(!first.is_completed);
        assert_eq!(store.projects().last(), Some(&second));
        assert_eq!(names(&store.list_ongoing()), vec!["Second", "First"]);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let mut store = empty_store();
        let result = store.create(input("A", "2024-02-30"));
        assert!(matches!(
            result,
            Err(StoreError::Validation(ValidationError::InvalidDeadline { .. }))
        ));

        let result = store.create(input("   ", "2024-02-01"));
        assert!(matches!(
            result,
            Err(StoreError::Validation(ValidationError::EmptyField("name")))
        ));

        assert!(store.projects().is_empty());
        assert!(store.storage().content().is_none());
    }

    #[test]
    fn test_ids_of_deleted_projects_are_not_reused() {
        let mut store = empty_store();
        let a = create(&mut store, "A", "2024-05-15");
        store.delete(&a).unwrap();
        let b = create(&mut store, "B", "2024-05-15");
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_keeps_position_and_completion() {
        let mut store = empty_store();
        create(&mut store, "A", "2024-05-15");
        let b = create(&mut store, "B", "2024-04-30");
        create(&mut store, "C", "2024-06-01");
        store.toggle_complete(&b).unwrap();

        let updated = store
            .update(
                &b,
                ProjectInput {
                    notes: Some(String::from("Needs review")),
                    ..input("B2", "2024-07-01")
                },
            )
            .unwrap()
            .value;

        assert_eq!(updated.id, b);
        assert!(updated.is_completed);
        assert_eq!(updated.notes.as_deref(), Some("Needs review"));
        assert_eq!(collection_names(&store), vec!["A", "B2", "C"]);
    }

    #[test]
    fn test_update_validates_input() {
        let mut store = empty_store();
        let a = create(&mut store, "A", "2024-05-15");
        let result = store.update(&a, input("A", "not a date"));
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.get(&a).unwrap().deadline, jiff::civil::date(2024, 5, 15));
    }

    #[test]
    fn test_operations_on_deleted_id_fail() {
        let mut store = empty_store();
        let a = create(&mut store, "A", "2024-05-15");
        let removed = store.delete(&a).unwrap().value;
        assert_eq!(removed.name, "A");

        assert!(matches!(store.delete(&a), Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.update(&a, input("A", "2024-05-15")),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.toggle_complete(&a),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.begin_edit(&a), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_clears_edit_session() {
        let mut store = empty_store();
        let a = create(&mut store, "A", "2024-05-15");
        let b = create(&mut store, "B", "2024-05-16");

        store.begin_edit(&a).unwrap();
        store.delete(&b).unwrap();
        assert_eq!(store.editing().map(|p| p.id.clone()), Some(a.clone()));

        store.delete(&a).unwrap();
        assert!(store.editing().is_none());
    }

    #[test]
    fn test_update_ends_edit_session() {
        let mut store = empty_store();
        let a = create(&mut store, "A", "2024-05-15");
        let prefill = ProjectInput::from(store.begin_edit(&a).unwrap());
        store
            .update(
                &a,
                ProjectInput {
                    name: String::from("Renamed"),
                    ..prefill
                },
            )
            .unwrap();
        assert!(store.editing().is_none());

        store.begin_edit(&a).unwrap();
        store.cancel_edit();
        assert!(store.editing().is_none());
    }

    #[test]
    fn test_toggle_complete_is_its_own_inverse() {
        let mut store = empty_store();
        let a = store
            .create(ProjectInput {
                notes: Some(String::new()),
                ..input("A", "2024-05-15")
            })
            .unwrap()
            .value;

        let once = store.toggle_complete(&a.id).unwrap().value;
        assert!(once.is_completed);
        let twice = store.toggle_complete(&a.id).unwrap().value;
        assert_eq!(twice, a);
    }

    #[test]
    fn test_sort_by_is_idempotent() {
        let mut store = empty_store();
        create(&mut store, "Charlie", "2024-01-01");
        create(&mut store, "alpha", "2024-01-02");
        create(&mut store, "Bravo", "2024-01-03");

        let _ = store.sort_by(SortKey::Name, SortDirection::Asc);
        let first = collection_names(&store);
        let _ = store.sort_by(SortKey::Name, SortDirection::Asc);

        assert_eq!(first, vec!["alpha", "Bravo", "Charlie"]);
        assert_eq!(collection_names(&store), first);
    }

    #[test]
    fn test_toggle_sort_reverses_direction() {
        let mut store = empty_store();
        create(&mut store, "Charlie", "2024-01-01");
        create(&mut store, "Alpha", "2024-01-02");
        create(&mut store, "Bravo", "2024-01-03");

        assert_eq!(store.toggle_sort(SortKey::Name).value, SortDirection::Asc);
        let ascending = collection_names(&store);
        assert_eq!(store.toggle_sort(SortKey::Name).value, SortDirection::Desc);
        let mut descending = collection_names(&store);
        descending.reverse();
        assert_eq!(descending, ascending);

        assert_eq!(store.toggle_sort(SortKey::Name).value, SortDirection::Asc);
        assert_eq!(store.toggle_sort(SortKey::Client).value, SortDirection::Asc);
    }

    #[test]
    fn test_sort_keeps_ties_in_prior_order() {
        let mut store = empty_store();
        create(&mut store, "Same", "2024-03-01");
        create(&mut store, "Other", "2024-01-01");
        let third = store
            .create(ProjectInput {
                client: String::from("Another"),
                ..input("Same", "2024-02-01")
            })
            .unwrap()
            .value;

        let _ = store.toggle_sort(SortKey::Name);
        let _ = store.toggle_sort(SortKey::Name);

        let order: Vec<_> = store.projects().iter().map(|p| p.client.clone()).collect();
        assert_eq!(
            order,
            vec![
                "Same client".to_string(),
                third.client,
                "Other client".to_string()
            ]
        );
    }

    #[test]
    fn test_listing_follows_explicit_sort() {
        let mut store = empty_store();
        create(&mut store, "B", "2024-01-01");
        create(&mut store, "A", "2024-03-01");
        let c = create(&mut store, "C", "2024-02-01");
        store.toggle_complete(&c).unwrap();

        let _ = store.sort_by(SortKey::Name, SortDirection::Desc);
        assert_eq!(names(&store.list_ongoing()), vec!["B", "A"]);
        assert_eq!(names(&store.list_completed()), vec!["C"]);
        assert_eq!(
            store.sort_config(),
            Some(SortConfig {
                key: SortKey::Name,
                direction: SortDirection::Desc
            })
        );
    }

    #[test]
    fn test_sort_persists_order() {
        let mut store = empty_store();
        create(&mut store, "B", "2024-01-01");
        create(&mut store, "A", "2024-03-01");
        let _ = store.sort_by(SortKey::Name, SortDirection::Asc);

        let saved = store.storage().load().unwrap().unwrap();
        let saved_names: Vec<_> = saved.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(saved_names, vec!["A", "B"]);
    }

    #[test]
    fn test_sort_survives_reopen() {
        let storage = MemoryStorage::default();
        let mut store = ProjectStore::open(&storage, Seed::Empty).unwrap();
        store.create(input("Zeta", "2024-01-01")).unwrap();
        store.create(input("Alpha", "2024-02-01")).unwrap();
        assert_eq!(store.toggle_sort(SortKey::Name).value, SortDirection::Asc);
        store.close().unwrap();

        let mut reopened = ProjectStore::open(&storage, Seed::Empty).unwrap();
        assert_eq!(
            reopened.sort_config(),
            Some(SortConfig {
                key: SortKey::Name,
                direction: SortDirection::Asc
            })
        );
        assert_eq!(names(&reopened.list_ongoing()), vec!["Alpha", "Zeta"]);

        // Picking the same column again flips it, as in the first session
        assert_eq!(
            reopened.toggle_sort(SortKey::Name).value,
            SortDirection::Desc
        );
        assert_eq!(names(&reopened.list_ongoing()), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_unreadable_sort_opens_with_default_order() {
        let storage = MemoryStorage::default().with_sort_content("{ broken");
        let mut store = ProjectStore::open(&storage, Seed::Empty).unwrap();
        assert_eq!(store.sort_config(), None);

        store.create(input("Late", "2024-09-01")).unwrap();
        store.create(input("Early", "2024-01-01")).unwrap();
        assert_eq!(names(&store.list_ongoing()), vec!["Early", "Late"]);
    }

    #[test]
    fn test_failed_sort_write_is_a_warning() {
        let mut store = ProjectStore::open(ReadOnlyStorage, Seed::Empty).unwrap();
        let applied = store.sort_by(SortKey::Client, SortDirection::Desc);
        assert!(applied.warning.is_some());
        assert_eq!(
            store.sort_config(),
            Some(SortConfig {
                key: SortKey::Client,
                direction: SortDirection::Desc
            })
        );
    }

    #[test]
    fn test_close_after_saved_mutation_does_not_write_again() {
        let storage = CountingStorage::default();
        storage.inner.save(&[]).unwrap();

        let mut store = ProjectStore::open(&storage, Seed::Sample).unwrap();
        store.create(input("A", "2024-05-15")).unwrap();
        assert_eq!(storage.saves.get(), 1);

        store.close().unwrap();
        assert_eq!(storage.saves.get(), 1);
    }

    #[test]
    fn test_close_without_changes_does_not_write() {
        let storage = CountingStorage::default();
        storage.inner.save(&[]).unwrap();
        let store = ProjectStore::open(&storage, Seed::Sample).unwrap();
        assert!(store.projects().is_empty());

        store.close().unwrap();
        assert_eq!(storage.saves.get(), 0);
    }

    #[test]
    fn test_mutations_write_through() {
        let mut store = empty_store();
        let a = store
            .create(ProjectInput {
                notes: Some(String::new()),
                drive_link: Some(String::from("https://drive.example.com/a")),
                ..input("A", "2024-05-15")
            })
            .unwrap()
            .value;
        create(&mut store, "B", "2024-05-16");
        store.toggle_complete(&a.id).unwrap();

        let storage = MemoryStorage::with_content(store.storage().content().unwrap());
        let reopened = ProjectStore::open(storage, Seed::Sample).unwrap();
        assert_eq!(reopened.projects(), store.projects());
        assert_eq!(reopened.projects()[1].notes, None);
        assert_eq!(reopened.projects()[0].notes, Some(String::new()));
    }

    #[test]
    fn test_failed_write_is_a_warning() {
        let mut store = ProjectStore::open(ReadOnlyStorage, Seed::Empty).unwrap();
        let applied = store.create(input("A", "2024-05-15")).unwrap();

        assert!(matches!(
            applied.warning,
            Some(StorageError::SaveFailed { .. })
        ));
        assert_eq!(store.projects().len(), 1);

        let id = applied.value.id;
        let toggled = store.toggle_complete(&id).unwrap();
        assert!(toggled.warning.is_some());
        assert!(store.get(&id).unwrap().is_completed);

        assert!(store.close().is_err());
    }

    #[test]
    fn test_subscribers_see_successful_mutations() {
        let mut store = empty_store();
        let seen: Rc<RefCell<Vec<(String, usize)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        store.subscribe(move |event, projects| {
            sink.borrow_mut().push((event.to_string(), projects.len()));
        });

        let a = create(&mut store, "A", "2024-05-15");
        let _ = store.create(input("", "2024-05-15"));
        let _ = store.toggle_complete(&ProjectId::from("missing"));
        store.toggle_complete(&a).unwrap();
        store.delete(&a).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                ("Project \"A\" added successfully!".to_string(), 1),
                ("Project \"A\" marked as complete".to_string(), 1),
                ("Project \"A\" deleted".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_resolve() {
        let mut store = empty_store();
        let web = create(&mut store, "Website Redesign", "2024-05-15");
        create(&mut store, "Mobile App", "2024-05-16");
        create(&mut store, "Mobile Web", "2024-05-17");

        assert_eq!(store.resolve(web.as_str()).unwrap().id, web);
        assert_eq!(store.resolve(&web.as_str()[..8]).unwrap().id, web);
        assert_eq!(store.resolve("redesign").unwrap().id, web);
        assert!(matches!(
            store.resolve("mobile"),
            Err(LookupError::Ambiguous(names)) if names.len() == 2
        ));
        assert!(matches!(
            store.resolve("unknown"),
            Err(LookupError::NotFound(_))
        ));
        assert!(matches!(store.resolve("  "), Err(LookupError::NotFound(_))));
    }

    #[test]
    fn test_open_from_sample_seed() {
        let store = ProjectStore::open(MemoryStorage::default(), Seed::Sample).unwrap();
        assert_eq!(
            names(&store.list_ongoing()),
            vec!["Analytics Dashboard", "E-commerce Platform", "Mobile App"]
        );
        assert!(store.list_completed().is_empty());
    }

    #[test]
    fn test_open_reports_invalid_dates() {
        let storage = MemoryStorage::with_content(
            r#"[{"id":"1","name":"A","deadline":"2024-02-30","client":"C","description":"D","isCompleted":false}]"#,
        );
        let result = ProjectStore::open(storage, Seed::Empty);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidDeadline { .. })
        ));
    }

    #[test]
    fn test_close_saves_collection() {
        let storage = MemoryStorage::default();
        let store = ProjectStore::open(&storage, Seed::Sample).unwrap();
        let expected = store.projects().to_vec();
        assert!(storage.content().is_none());

        store.close().unwrap();
        assert_eq!(storage.load().unwrap(), Some(expected));
    }
}
