//! State machine behind the directory view.
//!
//! [`DirectoryState`] owns one fetched page of users plus the search, letter
//! filter, pagination, and editing draft that act on it. Front ends feed it
//! [`DirectoryAction`]s; `filtered_users` is recomputed synchronously after
//! every action that touches the users, the query, or the letter.

use crate::models::{DirectoryUser, UpdatedUser, UserPage, UserUpdate};
use std::collections::BTreeSet;

/// Does `user` pass the search box and the letter filter?
///
/// The query is matched case-insensitively against
/// `"{first_name} {last_name} {email}"`; the letter must equal the first
/// character of `first_name`. Empty inputs match everything.
#[must_use]
pub fn matches(user: &DirectoryUser, search_query: &str, filter_letter: Option<char>) -> bool {
    let query_matches = search_query.is_empty()
        || user
            .search_haystack()
            .to_lowercase()
            .contains(&search_query.to_lowercase());
    let letter_matches = filter_letter.is_none_or(|letter| user.initial() == Some(letter));
    query_matches && letter_matches
}

/// The subsequence of `users` that passes [`matches`], in original order.
#[must_use]
pub fn filter_users(
    users: &[DirectoryUser],
    search_query: &str,
    filter_letter: Option<char>,
) -> Vec<DirectoryUser> {
    users
        .iter()
        .filter(|user| matches(user, search_query, filter_letter))
        .cloned()
        .collect()
}

/// Sorted distinct first initials of `users`.
#[must_use]
pub fn available_letters(users: &[DirectoryUser]) -> Vec<char> {
    users
        .iter()
        .filter_map(DirectoryUser::initial)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Which field of the editing draft changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// [`EditDraft::first_name`]
    FirstName,
    /// [`EditDraft::last_name`]
    LastName,
    /// [`EditDraft::email`]
    Email,
}

/// An unsaved copy of a record open for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Id of the record being edited.
    pub id: u64,
    /// Edited first name.
    pub first_name: String,
    /// Edited last name.
    pub last_name: String,
    /// Edited email address.
    pub email: String,
}

impl EditDraft {
    #[must_use]
    pub fn from_user(user: &DirectoryUser) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::FirstName => self.first_name = value,
            DraftField::LastName => self.last_name = value,
            DraftField::Email => self.email = value,
        }
    }

    /// The request body for submitting this draft.
    #[must_use]
    pub fn to_update(&self) -> UserUpdate {
        UserUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Everything that can happen to the directory view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryAction {
    /// A fetch for the current page went out, tagged with `generation`.
    FetchStarted { generation: u64 },
    /// A fetch completed. Ignored unless `generation` is the latest.
    PageLoaded { generation: u64, page: UserPage },
    /// A fetch failed. Ignored unless `generation` is the latest.
    FetchFailed { generation: u64 },
    SetSearch(String),
    SetLetter(Option<char>),
    PrevPage,
    NextPage,
    BeginEdit(u64),
    EditField(DraftField, String),
    CancelEdit,
    /// The service accepted an edit; merge its echo into the record.
    UserUpdated { id: u64, updated: UpdatedUser },
    /// The service accepted a delete; drop the record locally.
    UserDeleted(u64),
}

/// One page of the directory and the view state layered on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    page: u32,
    total_pages: u32,
    users: Vec<DirectoryUser>,
    filtered_users: Vec<DirectoryUser>,
    search_query: String,
    filter_letter: Option<char>,
    loading: bool,
    draft: Option<EditDraft>,
    generation: u64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            users: Vec::new(),
            filtered_users: Vec::new(),
            search_query: String::new(),
            filter_letter: None,
            loading: false,
            draft: None,
            generation: 0,
        }
    }
}

impl DirectoryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on `page` instead of the first page.
    #[must_use]
    pub fn starting_at(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn users(&self) -> &[DirectoryUser] {
        &self.users
    }

    #[must_use]
    pub fn filtered_users(&self) -> &[DirectoryUser] {
        &self.filtered_users
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub const fn filter_letter(&self) -> Option<char> {
        self.filter_letter
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The generation the next fetch should be tagged with.
    #[must_use]
    pub const fn next_generation(&self) -> u64 {
        self.generation + 1
    }

    #[must_use]
    pub const fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Letter filter options for the current page's unfiltered users.
    #[must_use]
    pub fn letters(&self) -> Vec<char> {
        available_letters(&self.users)
    }

    #[must_use]
    pub fn user(&self, id: u64) -> Option<&DirectoryUser> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Applies `action` and reports whether anything changed.
    pub fn apply(&mut self, action: DirectoryAction) -> bool {
        match action {
            DirectoryAction::FetchStarted { generation } => {
                self.generation = generation;
                self.loading = true;
                true
            }
            DirectoryAction::PageLoaded { generation, page } => {
                if generation != self.generation {
                    return false;
                }
                self.loading = false;
                self.total_pages = page.total_pages.max(1);
                self.page = self.page.min(self.total_pages);
                self.users = page.data;
                self.refilter();
                true
            }
            DirectoryAction::FetchFailed { generation } => {
                if generation != self.generation {
                    return false;
                }
                self.loading = false;
                true
            }
            DirectoryAction::SetSearch(query) => {
                self.search_query = query;
                self.refilter();
                true
            }
            DirectoryAction::SetLetter(letter) => {
                self.filter_letter = letter;
                self.refilter();
                true
            }
            DirectoryAction::PrevPage => {
                if !self.can_go_prev() {
                    return false;
                }
                self.page -= 1;
                true
            }
            DirectoryAction::NextPage => {
                if !self.can_go_next() {
                    return false;
                }
                self.page += 1;
                true
            }
            DirectoryAction::BeginEdit(id) => {
                let Some(user) = self.user(id) else {
                    return false;
                };
                self.draft = Some(EditDraft::from_user(user));
                true
            }
            DirectoryAction::EditField(field, value) => match self.draft.as_mut() {
                Some(draft) => {
                    draft.set(field, value);
                    true
                }
                None => false,
            },
            DirectoryAction::CancelEdit => self.draft.take().is_some(),
            DirectoryAction::UserUpdated { id, updated } => {
                if let Some(user) = self.users.iter_mut().find(|user| user.id == id) {
                    user.merge(&updated);
                }
                if self.draft.as_ref().is_some_and(|draft| draft.id == id) {
                    self.draft = None;
                }
                self.refilter();
                true
            }
            DirectoryAction::UserDeleted(id) => {
                self.users.retain(|user| user.id != id);
                if self.draft.as_ref().is_some_and(|draft| draft.id == id) {
                    self.draft = None;
                }
                self.refilter();
                true
            }
        }
    }

    fn refilter(&mut self) {
        self.filtered_users = filter_users(&self.users, &self.search_query, self.filter_letter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, first_name: &str, last_name: &str) -> DirectoryUser {
        DirectoryUser {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: format!(
                "{}.{}@reqres.in",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            ),
            avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
        }
    }

    fn first_page() -> UserPage {
        UserPage {
            page: 1,
            per_page: 6,
            total: 12,
            total_pages: 2,
            data: vec![
                user(1, "George", "Bluth"),
                user(2, "Janet", "Weaver"),
                user(3, "Emma", "Wong"),
                user(4, "Eve", "Holt"),
                user(5, "Charles", "Morris"),
                user(6, "Tracey", "Ramos"),
            ],
        }
    }

    fn loaded() -> DirectoryState {
        let mut state = DirectoryState::new();
        let generation = state.next_generation();
        state.apply(DirectoryAction::FetchStarted { generation });
        state.apply(DirectoryAction::PageLoaded {
            generation,
            page: first_page(),
        });
        state
    }

    fn ids(users: &[DirectoryUser]) -> Vec<u64> {
        users.iter().map(|user| user.id).collect()
    }

    #[test]
    fn test_loaded_page_is_unfiltered() {
        let state = loaded();
        assert!(!state.is_loading());
        assert_eq!(state.total_pages(), 2);
        assert_eq!(ids(state.filtered_users()), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut state = loaded();

        state.apply(DirectoryAction::SetSearch("george".to_string()));
        assert_eq!(ids(state.filtered_users()), vec![1]);

        state.apply(DirectoryAction::SetSearch("zzz".to_string()));
        assert!(state.filtered_users().is_empty());

        state.apply(DirectoryAction::SetSearch("REQRES".to_string()));
        assert_eq!(state.filtered_users().len(), 6);
    }

    #[test]
    fn test_search_spans_name_boundary_and_email() {
        let mut state = loaded();
        state.apply(DirectoryAction::SetSearch("eve holt".to_string()));
        assert_eq!(ids(state.filtered_users()), vec![4]);

        state.apply(DirectoryAction::SetSearch("weaver@".to_string()));
        assert_eq!(ids(state.filtered_users()), vec![2]);
    }

    #[test]
    fn test_every_search_result_contains_the_query() {
        let mut state = loaded();
        for query in ["e", "Wo", "ra", "@reqres", "s m"] {
            state.apply(DirectoryAction::SetSearch(query.to_string()));
            for user in state.filtered_users() {
                assert!(
                    user.search_haystack()
                        .to_lowercase()
                        .contains(&query.to_lowercase())
                );
            }
        }
    }

    #[test]
    fn test_letter_filter_matches_first_initial() {
        let mut state = loaded();
        state.apply(DirectoryAction::SetLetter(Some('E')));
        assert_eq!(ids(state.filtered_users()), vec![3, 4]);
        assert!(
            state
                .filtered_users()
                .iter()
                .all(|user| user.first_name.starts_with('E'))
        );

        state.apply(DirectoryAction::SetLetter(Some('e')));
        assert!(state.filtered_users().is_empty());
    }

    #[test]
    fn test_search_and_letter_combine_with_and() {
        let mut state = loaded();
        state.apply(DirectoryAction::SetLetter(Some('E')));
        state.apply(DirectoryAction::SetSearch("holt".to_string()));
        assert_eq!(ids(state.filtered_users()), vec![4]);

        state.apply(DirectoryAction::SetLetter(None));
        state.apply(DirectoryAction::SetSearch(String::new()));
        assert_eq!(state.filtered_users().len(), 6);
    }

    #[test]
    fn test_letters_are_sorted_distinct_initials_of_the_page() {
        let state = loaded();
        assert_eq!(state.letters(), vec!['C', 'E', 'G', 'J', 'T']);
    }

    #[test]
    fn test_letters_ignore_the_active_filter() {
        let mut state = loaded();
        state.apply(DirectoryAction::SetSearch("george".to_string()));
        assert_eq!(state.letters().len(), 5);
    }

    #[test]
    fn test_pagination_boundaries() {
        let mut state = loaded();
        assert_eq!(state.page(), 1);
        assert!(!state.can_go_prev());
        assert!(state.can_go_next());
        assert!(!state.apply(DirectoryAction::PrevPage));

        assert!(state.apply(DirectoryAction::NextPage));
        assert_eq!(state.page(), 2);
        assert!(state.can_go_prev());
        assert!(!state.can_go_next());
        assert!(!state.apply(DirectoryAction::NextPage));
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_single_page_disables_both_controls() {
        let state = DirectoryState::new();
        assert!(!state.can_go_prev());
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_new_page_replaces_users_and_reapplies_filters() {
        let mut state = loaded();
        state.apply(DirectoryAction::SetLetter(Some('M')));
        assert!(state.filtered_users().is_empty());

        state.apply(DirectoryAction::NextPage);
        let generation = state.next_generation();
        state.apply(DirectoryAction::FetchStarted { generation });
        assert!(state.is_loading());
        state.apply(DirectoryAction::PageLoaded {
            generation,
            page: UserPage {
                page: 2,
                per_page: 6,
                total: 12,
                total_pages: 2,
                data: vec![user(7, "Michael", "Lawson"), user(8, "Lindsay", "Ferguson")],
            },
        });

        assert_eq!(ids(state.users()), vec![7, 8]);
        assert_eq!(ids(state.filtered_users()), vec![7]);
        assert_eq!(state.letters(), vec!['L', 'M']);
    }

    #[test]
    fn test_stale_page_is_discarded() {
        let mut state = DirectoryState::new();
        let stale = state.next_generation();
        state.apply(DirectoryAction::FetchStarted { generation: stale });
        let fresh = state.next_generation();
        state.apply(DirectoryAction::FetchStarted { generation: fresh });

        assert!(!state.apply(DirectoryAction::PageLoaded {
            generation: stale,
            page: first_page(),
        }));
        assert!(state.users().is_empty());
        assert!(state.is_loading());

        assert!(!state.apply(DirectoryAction::FetchFailed { generation: stale }));
        assert!(state.is_loading());

        assert!(state.apply(DirectoryAction::FetchFailed { generation: fresh }));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_same_page_twice_yields_identical_users() {
        let mut state = loaded();
        let before = state.users().to_vec();
        let generation = state.next_generation();
        state.apply(DirectoryAction::FetchStarted { generation });
        state.apply(DirectoryAction::PageLoaded {
            generation,
            page: first_page(),
        });
        assert_eq!(state.users(), before.as_slice());
    }

    #[test]
    fn test_shrinking_total_pages_clamps_page() {
        let mut state = DirectoryState::starting_at(5);
        let generation = state.next_generation();
        state.apply(DirectoryAction::FetchStarted { generation });
        state.apply(DirectoryAction::PageLoaded {
            generation,
            page: UserPage {
                page: 5,
                per_page: 6,
                total: 0,
                total_pages: 0,
                data: Vec::new(),
            },
        });
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_edit_draft_lifecycle() {
        let mut state = loaded();
        assert!(!state.apply(DirectoryAction::BeginEdit(99)));
        assert!(state.draft().is_none());

        state.apply(DirectoryAction::BeginEdit(1));
        assert_eq!(
            state.draft().map(|draft| draft.first_name.as_str()),
            Some("George")
        );

        state.apply(DirectoryAction::EditField(
            DraftField::FirstName,
            "Georgia".to_string(),
        ));
        assert_eq!(state.user(1).map(|u| u.first_name.as_str()), Some("George"));

        assert!(state.apply(DirectoryAction::CancelEdit));
        assert!(state.draft().is_none());
        assert!(!state.apply(DirectoryAction::EditField(
            DraftField::Email,
            "x@y.z".to_string()
        )));
    }

    #[test]
    fn test_user_updated_merges_and_closes_draft() {
        let mut state = loaded();
        state.apply(DirectoryAction::BeginEdit(1));
        state.apply(DirectoryAction::EditField(
            DraftField::FirstName,
            "Georgia".to_string(),
        ));
        let update = state.draft().unwrap().to_update();

        state.apply(DirectoryAction::UserUpdated {
            id: 1,
            updated: UpdatedUser {
                first_name: Some(update.first_name),
                last_name: Some(update.last_name),
                email: Some(update.email),
                avatar: None,
                updated_at: Some("2025-03-27T10:00:00.000Z".to_string()),
            },
        });

        assert!(state.draft().is_none());
        let record = state.user(1).unwrap();
        assert_eq!(record.first_name, "Georgia");
        assert_eq!(record.avatar, "https://reqres.in/img/faces/1-image.jpg");
        assert_eq!(state.filtered_users()[0].first_name, "Georgia");
    }

    #[test]
    fn test_update_refreshes_filtered_view() {
        let mut state = loaded();
        state.apply(DirectoryAction::SetSearch("george b".to_string()));
        assert_eq!(ids(state.filtered_users()), vec![1]);

        state.apply(DirectoryAction::UserUpdated {
            id: 1,
            updated: UpdatedUser {
                first_name: Some("Georgia".to_string()),
                ..UpdatedUser::default()
            },
        });
        assert!(state.filtered_users().is_empty());
    }

    #[test]
    fn test_user_deleted_removes_from_both_lists() {
        let mut state = loaded();
        state.apply(DirectoryAction::SetLetter(Some('J')));
        assert_eq!(ids(state.filtered_users()), vec![2]);

        state.apply(DirectoryAction::UserDeleted(2));

        assert!(state.user(2).is_none());
        assert!(state.filtered_users().is_empty());
        assert_eq!(state.users().len(), 5);
        assert_eq!(state.letters(), vec!['C', 'E', 'G', 'T']);
    }

    #[test]
    fn test_deleting_the_edited_user_closes_the_draft() {
        let mut state = loaded();
        state.apply(DirectoryAction::BeginEdit(3));
        state.apply(DirectoryAction::UserDeleted(3));
        assert!(state.draft().is_none());
    }
}
