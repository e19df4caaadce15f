//! Access rules.
//!
//! One predicate per operation. Each takes the caller, the payload and the
//! records the [`Engine`](crate::Engine) fetched for it, and returns either
//! the normalized input to persist or the rejection. The [`EngineError`]
//! variant is the classification of the rejection.
//!
//! Fetch, update and delete of an event do not tell a missing event apart
//! from someone else's event: both are forbidden.

use chrono::{DateTime, Utc};

use crate::{
    EngineError, Event, EventChanges, EventDraft, Expenditure, ExpenditureDraft, Invitation,
    InvitationStatus, NewEvent, NewExpenditure, ResultEngine, User,
    util::{normalize_required_text, normalize_text, require_non_negative},
};

const NAME_MAX: usize = 100;
const TEXT_MAX: usize = 255;

fn forbidden(reason: &str) -> EngineError {
    EngineError::Forbidden(reason.to_string())
}

fn not_found(reason: &str) -> EngineError {
    EngineError::KeyNotFound(reason.to_string())
}

fn event_not_found() -> EngineError {
    not_found("Event with this id does not exist")
}

/// Return the event if the caller created it.
fn require_creator(caller: i32, event: Option<&Event>) -> ResultEngine<&Event> {
    event
        .filter(|event| event.is_created_by(caller))
        .ok_or_else(|| forbidden("User not permitted to access this event"))
}

pub fn create_event(caller: i32, draft: EventDraft) -> ResultEngine<NewEvent> {
    let draft = EventDraft {
        name: normalize_required_text(&draft.name, "name", NAME_MAX)?,
        description: normalize_text(&draft.description, "description", TEXT_MAX)?,
        venue: normalize_required_text(&draft.venue, "venue", TEXT_MAX)?,
        time: draft.time,
        duration: require_non_negative(draft.duration, "duration")?,
        fire_id: normalize_required_text(&draft.fire_id, "fireId", TEXT_MAX)?,
    };
    Ok(NewEvent {
        draft,
        creator_id: caller,
    })
}

pub fn fetch_event(caller: i32, event: Option<Event>) -> ResultEngine<Event> {
    event
        .filter(|event| event.is_created_by(caller))
        .ok_or_else(|| forbidden("User not permitted to access this event"))
}

pub fn update_event(
    caller: i32,
    event: Option<&Event>,
    changes: EventChanges,
    now: DateTime<Utc>,
) -> ResultEngine<EventChanges> {
    let event = require_creator(caller, event)?;
    if event.is_past(now) {
        return Err(forbidden(
            "Event cannot be modified because it is completed",
        ));
    }

    Ok(EventChanges {
        name: normalize_required_text(&changes.name, "name", NAME_MAX)?,
        description: normalize_text(&changes.description, "description", TEXT_MAX)?,
        venue: normalize_required_text(&changes.venue, "venue", TEXT_MAX)?,
        time: changes.time,
    })
}

pub fn delete_event(caller: i32, event: Option<&Event>) -> ResultEngine<()> {
    require_creator(caller, event).map(|_| ())
}

/// Rules for inviting `target` to `event`, in order: the user exists, the
/// event exists, no invitation exists yet, the event is not past.
///
/// Returns the user to invite and the event id.
pub fn invite_user<'a>(
    target: Option<&'a User>,
    event: Option<&Event>,
    existing: Option<&Invitation>,
    now: DateTime<Utc>,
) -> ResultEngine<(&'a User, i32)> {
    let target = target.ok_or_else(|| not_found("User with this email does not exist"))?;
    let event = event.ok_or_else(event_not_found)?;
    if existing.is_some() {
        return Err(EngineError::ExistingKey(
            "User is already invited to this event".to_string(),
        ));
    }
    if event.is_past(now) {
        return Err(forbidden(
            "User cannot be invited because event is completed",
        ));
    }
    Ok((target, event.id))
}

/// The caller's own invitation is the only one they may answer.
pub fn set_invitation_status(
    invitation: Option<&Invitation>,
    status: i32,
) -> ResultEngine<(i32, InvitationStatus)> {
    let invitation =
        invitation.ok_or_else(|| forbidden("User not permitted to modify this invitation"))?;
    let status = InvitationStatus::try_from(status)?;
    Ok((invitation.id, status))
}

pub fn remove_invitation(
    caller: i32,
    invitation: Option<&Invitation>,
    event: Option<&Event>,
) -> ResultEngine<i32> {
    let invitation =
        invitation.ok_or_else(|| not_found("Invitation with this id does not exist"))?;
    match event {
        Some(event) if event.is_created_by(caller) => Ok(invitation.id),
        _ => Err(forbidden("User is not permitted to delete this invitation")),
    }
}

/// The guest list is visible to the creator and to every invitee.
pub fn fetch_guest_list(
    caller: i32,
    event: Option<&Event>,
    caller_invitation: Option<&Invitation>,
) -> ResultEngine<i32> {
    let event = event.ok_or_else(event_not_found)?;
    if event.is_created_by(caller) || caller_invitation.is_some() {
        return Ok(event.id);
    }
    Err(forbidden(
        "User not permitted to see guest list of this event",
    ))
}

pub fn fetch_invited_event(caller_invitation: Option<&Invitation>) -> ResultEngine<&Invitation> {
    caller_invitation.ok_or_else(|| forbidden("User is not permitted to view this event"))
}

pub fn list_expenditures(caller: i32, event: Option<&Event>) -> ResultEngine<i32> {
    event
        .filter(|event| event.is_created_by(caller))
        .map(|event| event.id)
        .ok_or_else(|| forbidden("User not permitted to view expenditure of this event"))
}

/// Any caller may add an expenditure to an existing event.
pub fn add_expenditure(
    event: Option<&Event>,
    draft: ExpenditureDraft,
) -> ResultEngine<NewExpenditure> {
    let event = event.ok_or_else(event_not_found)?;
    let draft = ExpenditureDraft {
        name: normalize_required_text(&draft.name, "name", NAME_MAX)?,
        organization: normalize_required_text(&draft.organization, "organization", NAME_MAX)?,
        quantity: require_non_negative(draft.quantity, "quantity")?,
        unit_price: require_non_negative(draft.unit_price, "unitPrice")?,
    };
    Ok(NewExpenditure {
        draft,
        event_id: event.id,
    })
}

pub fn delete_expenditure(
    caller: i32,
    expenditure: Option<&Expenditure>,
    event: Option<&Event>,
) -> ResultEngine<i32> {
    let expenditure =
        expenditure.ok_or_else(|| not_found("Expenditure with this id does not exist"))?;
    match event {
        Some(event) if event.is_created_by(caller) => Ok(expenditure.id),
        _ => Err(forbidden(
            "User is not permitted to delete this expenditure",
        )),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, SubsecRound};

    use super::*;

    const CREATOR: i32 = 1;
    const GUEST: i32 = 2;
    const STRANGER: i32 = 3;

    fn event_in(offset: Duration) -> Event {
        Event {
            id: 10,
            name: "Launch".to_string(),
            description: String::new(),
            venue: "Hall A".to_string(),
            time: Utc::now() + offset,
            duration: 60,
            creator_id: CREATOR,
            fire_id: "cal-10".to_string(),
        }
    }

    fn invitation(user_id: i32) -> Invitation {
        Invitation {
            id: 100,
            user_id,
            event_id: 10,
            status: InvitationStatus::Pending,
        }
    }

    fn guest() -> User {
        User {
            id: GUEST,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        }
    }

    fn changes() -> EventChanges {
        EventChanges {
            name: " Launch v2 ".to_string(),
            description: "moved".to_string(),
            venue: "Hall B".to_string(),
            time: Utc::now() + Duration::days(2),
        }
    }

    fn draft() -> EventDraft {
        EventDraft {
            name: "Launch".to_string(),
            description: String::new(),
            venue: "Hall A".to_string(),
            time: Utc::now() + Duration::days(1),
            duration: 90,
            fire_id: "cal-10".to_string(),
        }
    }

    fn forbidden_access() -> EngineError {
        EngineError::Forbidden("User not permitted to access this event".to_string())
    }

    #[test]
    fn caller_becomes_creator() {
        let new = create_event(STRANGER, draft()).unwrap();
        assert_eq!(new.creator_id, STRANGER);
    }

    #[test]
    fn create_event_rejects_bad_fields() {
        let mut bad = draft();
        bad.venue = " ".to_string();
        assert!(matches!(
            create_event(CREATOR, bad),
            Err(EngineError::InvalidInput(_))
        ));

        let mut bad = draft();
        bad.duration = -5;
        assert!(matches!(
            create_event(CREATOR, bad),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn only_creator_fetches_event() {
        let event = event_in(Duration::days(1));
        assert_eq!(fetch_event(CREATOR, Some(event.clone())).unwrap(), event);
        assert_eq!(
            fetch_event(STRANGER, Some(event)).unwrap_err(),
            forbidden_access()
        );
        assert_eq!(fetch_event(CREATOR, None).unwrap_err(), forbidden_access());
    }

    #[test]
    fn update_requires_creator_and_future_event() {
        let event = event_in(Duration::days(1));
        let normalized = update_event(CREATOR, Some(&event), changes(), Utc::now()).unwrap();
        assert_eq!(normalized.name, "Launch v2");

        assert_eq!(
            update_event(STRANGER, Some(&event), changes(), Utc::now()).unwrap_err(),
            forbidden_access()
        );
        assert_eq!(
            update_event(CREATOR, None, changes(), Utc::now()).unwrap_err(),
            forbidden_access()
        );
    }

    #[test]
    fn past_event_update_is_forbidden_not_bad_request() {
        let event = event_in(-Duration::days(1));
        assert_eq!(
            update_event(CREATOR, Some(&event), changes(), Utc::now()).unwrap_err(),
            EngineError::Forbidden("Event cannot be modified because it is completed".to_string())
        );
    }

    #[test]
    fn update_of_event_in_current_second_is_allowed() {
        let now = Utc::now();
        let mut event = event_in(Duration::zero());
        event.time = now.trunc_subsecs(0);
        assert!(update_event(CREATOR, Some(&event), changes(), now).is_ok());
    }

    #[test]
    fn only_creator_deletes_event() {
        let event = event_in(-Duration::days(1));
        assert!(delete_event(CREATOR, Some(&event)).is_ok());
        assert_eq!(
            delete_event(GUEST, Some(&event)).unwrap_err(),
            forbidden_access()
        );
        assert_eq!(delete_event(CREATOR, None).unwrap_err(), forbidden_access());
    }

    #[test]
    fn invite_checks_in_order() {
        let future = event_in(Duration::days(1));
        let past = event_in(-Duration::days(1));
        let existing = invitation(GUEST);
        let now = Utc::now();

        assert_eq!(
            invite_user(None, None, None, now).unwrap_err(),
            EngineError::KeyNotFound("User with this email does not exist".to_string())
        );
        assert_eq!(
            invite_user(Some(&guest()), None, None, now).unwrap_err(),
            EngineError::KeyNotFound("Event with this id does not exist".to_string())
        );
        assert_eq!(
            invite_user(Some(&guest()), Some(&past), Some(&existing), now).unwrap_err(),
            EngineError::ExistingKey("User is already invited to this event".to_string())
        );
        assert_eq!(
            invite_user(Some(&guest()), Some(&past), None, now).unwrap_err(),
            EngineError::Forbidden("User cannot be invited because event is completed".to_string())
        );
        let target = guest();
        let (user, event_id) = invite_user(Some(&target), Some(&future), None, now).unwrap();
        assert_eq!((user.id, event_id), (GUEST, 10));
    }

    #[test]
    fn status_needs_own_invitation() {
        let own = invitation(GUEST);
        assert_eq!(
            set_invitation_status(Some(&own), 1).unwrap(),
            (100, InvitationStatus::Accepted)
        );
        assert!(matches!(
            set_invitation_status(None, 1),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            set_invitation_status(Some(&own), 9),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn only_creator_removes_invitation() {
        let event = event_in(Duration::days(1));
        let own = invitation(GUEST);
        assert_eq!(
            remove_invitation(CREATOR, Some(&own), Some(&event)).unwrap(),
            100
        );
        assert!(matches!(
            remove_invitation(GUEST, Some(&own), Some(&event)),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            remove_invitation(CREATOR, None, Some(&event)),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn guest_list_visible_to_creator_and_invitees() {
        let event = event_in(Duration::days(1));
        let own = invitation(GUEST);
        assert_eq!(fetch_guest_list(CREATOR, Some(&event), None).unwrap(), 10);
        assert_eq!(
            fetch_guest_list(GUEST, Some(&event), Some(&own)).unwrap(),
            10
        );
        assert!(matches!(
            fetch_guest_list(STRANGER, Some(&event), None),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            fetch_guest_list(CREATOR, None, None),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn invited_event_needs_invitation() {
        let own = invitation(GUEST);
        assert_eq!(fetch_invited_event(Some(&own)).unwrap(), &own);
        assert!(matches!(
            fetch_invited_event(None),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn expenditures_listed_by_creator_only() {
        let event = event_in(Duration::days(1));
        assert_eq!(list_expenditures(CREATOR, Some(&event)).unwrap(), 10);
        assert!(matches!(
            list_expenditures(GUEST, Some(&event)),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            list_expenditures(CREATOR, None),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn anyone_adds_expenditure_to_existing_event() {
        let event = event_in(-Duration::days(1));
        let draft = ExpenditureDraft {
            name: "Chairs".to_string(),
            organization: "Rentals".to_string(),
            quantity: 20,
            unit_price: 3,
        };
        let new = add_expenditure(Some(&event), draft.clone()).unwrap();
        assert_eq!(new.event_id, 10);
        assert_eq!(
            add_expenditure(None, draft).unwrap_err(),
            EngineError::KeyNotFound("Event with this id does not exist".to_string())
        );
    }

    #[test]
    fn expenditure_deleted_by_creator_only() {
        let event = event_in(Duration::days(1));
        let expenditure = Expenditure {
            id: 5,
            name: "Chairs".to_string(),
            organization: "Rentals".to_string(),
            quantity: 20,
            unit_price: 3,
            event_id: 10,
        };
        assert_eq!(
            delete_expenditure(CREATOR, Some(&expenditure), Some(&event)).unwrap(),
            5
        );
        assert!(matches!(
            delete_expenditure(GUEST, Some(&expenditure), Some(&event)),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            delete_expenditure(CREATOR, None, None),
            Err(EngineError::KeyNotFound(_))
        ));
    }
}
