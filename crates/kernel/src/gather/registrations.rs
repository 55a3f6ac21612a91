//! Registration queries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{count_by, count_each, count_if};
use super::types::{Page, PageWindow, SortDirection, SortField, SortSpec, compare_text, search_term};
use crate::error::{AppError, AppResult};
use crate::models::common::contains_folded;
use crate::models::{PaymentStatus, Record, Registration, RegistrationType, TicketType, Track};

pub const DEFAULT_LIMIT: u32 = 10;

/// Sortable registration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationSort {
    /// Most recent first.
    #[default]
    CreatedAt,
    Name,
    Email,
}

impl SortField for RegistrationSort {
    const KEYS: &'static [(Self, &'static str)] = &[
        (RegistrationSort::CreatedAt, "createdAt"),
        (RegistrationSort::Name, "name"),
        (RegistrationSort::Email, "email"),
    ];

    fn natural_direction(self) -> SortDirection {
        match self {
            RegistrationSort::CreatedAt => SortDirection::Desc,
            RegistrationSort::Name | RegistrationSort::Email => SortDirection::Asc,
        }
    }
}

/// Registration list parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec<RegistrationSort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_type: Option<RegistrationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl RegistrationQuery {
    fn matches(&self, r: &Registration, term: Option<&str>) -> bool {
        self.ticket_type.is_none_or(|t| r.ticket_type == t)
            && self.registration_type.is_none_or(|t| r.registration_type == t)
            && self.payment_status.is_none_or(|p| r.payment_status == p)
            && self.checked_in.is_none_or(|c| r.checked_in == c)
            && self.is_active.is_none_or(|a| r.is_active == a)
            && term.is_none_or(|t| {
                contains_folded(&r.full_name(), t)
                    || contains_folded(&r.email, t)
                    || contains_folded(&r.institution, t)
                    || contains_folded(&r.confirmation_code, t)
            })
    }
}

/// Unfiltered registration counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStats {
    pub total: u64,
    pub active: u64,
    pub checked_in: u64,
    pub by_ticket_type: BTreeMap<TicketType, u64>,
    pub by_registration_type: BTreeMap<RegistrationType, u64>,
    pub by_payment_status: BTreeMap<PaymentStatus, u64>,
    pub by_interest: BTreeMap<Track, u64>,
}

/// Filter, sort and page registrations.
pub fn query(
    registrations: &[Registration],
    params: &RegistrationQuery,
) -> Page<Registration, RegistrationStats> {
    let term = search_term(params.search.as_deref());
    let mut matched: Vec<Registration> = registrations
        .iter()
        .filter(|r| params.matches(r, term.as_deref()))
        .cloned()
        .collect();

    sort(&mut matched, params.sort.unwrap_or_default());

    PageWindow::new(params.page, params.limit, DEFAULT_LIMIT)
        .apply(matched, Some(stats(registrations)))
}

/// Stable sort by the given key.
pub fn sort(registrations: &mut [Registration], spec: SortSpec<RegistrationSort>) {
    let direction = spec.direction();
    registrations.sort_by(|a, b| direction.apply(compare(a, b, spec.key)));
}

fn compare(a: &Registration, b: &Registration, key: RegistrationSort) -> Ordering {
    match key {
        RegistrationSort::CreatedAt => a.created_at.cmp(&b.created_at),
        RegistrationSort::Name => compare_text(&a.last_name, &b.last_name)
            .then_with(|| compare_text(&a.first_name, &b.first_name)),
        RegistrationSort::Email => compare_text(&a.email, &b.email),
    }
}

pub fn stats(registrations: &[Registration]) -> RegistrationStats {
    RegistrationStats {
        total: registrations.len() as u64,
        active: count_if(registrations, |r| r.is_active),
        checked_in: count_if(registrations, |r| r.checked_in),
        by_ticket_type: count_by(registrations, |r| r.ticket_type),
        by_registration_type: count_by(registrations, |r| r.registration_type),
        by_payment_status: count_by(registrations, |r| r.payment_status),
        by_interest: count_each(registrations, |r| r.interests.clone()),
    }
}

/// Look up a registration by confirmation code, ignoring case.
pub fn find_by_code<'a>(registrations: &'a [Registration], code: &str) -> AppResult<&'a Registration> {
    let code = code.trim();
    registrations
        .iter()
        .find(|r| r.confirmation_code.eq_ignore_ascii_case(code))
        .ok_or_else(|| AppError::not_found(Registration::ENTITY, code))
}
