// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! RFC 5545 structural rules, expressed as static tables.

use strum::Display;

use crate::keyword::{
    KW_ACTION, KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL, KW_ATTACH, KW_ATTENDEE,
    KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT, KW_COMPLETED, KW_CONTACT, KW_CREATED,
    KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE, KW_DURATION, KW_EXDATE,
    KW_FREEBUSY, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION, KW_METHOD, KW_ORGANIZER,
    KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE, KW_RECURRENCE_ID, KW_RELATED_TO,
    KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_STATUS, KW_SUMMARY,
    KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_UID,
    KW_URL, KW_VERSION,
};
use crate::model::{ComponentKind, ParameterKind};

/// How many times a property may occur in a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Cardinality {
    /// Optional, at most once
    #[strum(serialize = "0..1")]
    ZeroOrOne,

    /// Required, exactly once
    #[strum(serialize = "1")]
    ExactlyOne,

    /// Optional, any number of times
    #[strum(serialize = "0..*")]
    ZeroOrMore,

    /// Required, any number of times
    #[strum(serialize = "1..*")]
    OneOrMore,
}

impl Cardinality {
    /// Minimum number of occurrences.
    pub const fn min(self) -> usize {
        match self {
            Self::ZeroOrOne | Self::ZeroOrMore => 0,
            Self::ExactlyOne | Self::OneOrMore => 1,
        }
    }

    /// Maximum number of occurrences, if bounded.
    pub const fn max(self) -> Option<usize> {
        match self {
            Self::ZeroOrOne | Self::ExactlyOne => Some(1),
            Self::ZeroOrMore | Self::OneOrMore => None,
        }
    }

    /// Returns `true` if `count` occurrences are allowed.
    pub fn accepts(self, count: usize) -> bool {
        count >= self.min() && self.max().is_none_or(|max| count <= max)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PropertyRule {
    pub name: &'static str,
    pub cardinality: Cardinality,
}

const fn one(name: &'static str) -> PropertyRule {
    PropertyRule {
        name,
        cardinality: Cardinality::ExactlyOne,
    }
}

const fn opt(name: &'static str) -> PropertyRule {
    PropertyRule {
        name,
        cardinality: Cardinality::ZeroOrOne,
    }
}

const fn many(name: &'static str) -> PropertyRule {
    PropertyRule {
        name,
        cardinality: Cardinality::ZeroOrMore,
    }
}

const fn some(name: &'static str) -> PropertyRule {
    PropertyRule {
        name,
        cardinality: Cardinality::OneOrMore,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ComponentRule {
    pub kind: ComponentKind,
    pub properties: &'static [PropertyRule],
    /// Known sub-components allowed; experimental and unknown ones always are
    pub children: &'static [ComponentKind],
    /// At least one of `children` must be present
    pub requires_child: bool,
}

pub static COMPONENT_RULES: &[ComponentRule] = &[
    // 3.4.  iCalendar Object, 3.6.  Calendar Components
    ComponentRule {
        kind: ComponentKind::Calendar,
        properties: &[one(KW_PRODID), one(KW_VERSION), opt(KW_CALSCALE), opt(KW_METHOD)],
        children: &[
            ComponentKind::Event,
            ComponentKind::Todo,
            ComponentKind::Journal,
            ComponentKind::FreeBusy,
            ComponentKind::TimeZone,
        ],
        requires_child: true,
    },
    // 3.6.1.  Event Component
    ComponentRule {
        kind: ComponentKind::Event,
        properties: &[
            one(KW_DTSTAMP),
            one(KW_UID),
            opt(KW_DTSTART),
            opt(KW_CLASS),
            opt(KW_CREATED),
            opt(KW_DESCRIPTION),
            opt(KW_GEO),
            opt(KW_LAST_MODIFIED),
            opt(KW_LOCATION),
            opt(KW_ORGANIZER),
            opt(KW_PRIORITY),
            opt(KW_SEQUENCE),
            opt(KW_STATUS),
            opt(KW_SUMMARY),
            opt(KW_TRANSP),
            opt(KW_URL),
            opt(KW_RECURRENCE_ID),
            opt(KW_RRULE),
            opt(KW_DTEND),
            opt(KW_DURATION),
            many(KW_ATTACH),
            many(KW_ATTENDEE),
            many(KW_CATEGORIES),
            many(KW_COMMENT),
            many(KW_CONTACT),
            many(KW_EXDATE),
            many(KW_REQUEST_STATUS),
            many(KW_RELATED_TO),
            many(KW_RESOURCES),
            many(KW_RDATE),
        ],
        children: &[ComponentKind::Alarm],
        requires_child: false,
    },
    // 3.6.2.  To-Do Component
    ComponentRule {
        kind: ComponentKind::Todo,
        properties: &[
            one(KW_DTSTAMP),
            one(KW_UID),
            opt(KW_CLASS),
            opt(KW_COMPLETED),
            opt(KW_CREATED),
            opt(KW_DESCRIPTION),
            opt(KW_DTSTART),
            opt(KW_GEO),
            opt(KW_LAST_MODIFIED),
            opt(KW_LOCATION),
            opt(KW_ORGANIZER),
            opt(KW_PERCENT_COMPLETE),
            opt(KW_PRIORITY),
            opt(KW_RECURRENCE_ID),
            opt(KW_SEQUENCE),
            opt(KW_STATUS),
            opt(KW_SUMMARY),
            opt(KW_URL),
            opt(KW_RRULE),
            opt(KW_DUE),
            opt(KW_DURATION),
            many(KW_ATTACH),
            many(KW_ATTENDEE),
            many(KW_CATEGORIES),
            many(KW_COMMENT),
            many(KW_CONTACT),
            many(KW_EXDATE),
            many(KW_REQUEST_STATUS),
            many(KW_RELATED_TO),
            many(KW_RESOURCES),
            many(KW_RDATE),
        ],
        children: &[ComponentKind::Alarm],
        requires_child: false,
    },
    // 3.6.3.  Journal Component
    ComponentRule {
        kind: ComponentKind::Journal,
        properties: &[
            one(KW_DTSTAMP),
            one(KW_UID),
            opt(KW_CLASS),
            opt(KW_CREATED),
            opt(KW_DTSTART),
            opt(KW_LAST_MODIFIED),
            opt(KW_ORGANIZER),
            opt(KW_RECURRENCE_ID),
            opt(KW_SEQUENCE),
            opt(KW_STATUS),
            opt(KW_SUMMARY),
            opt(KW_URL),
            opt(KW_RRULE),
            many(KW_ATTACH),
            many(KW_ATTENDEE),
            many(KW_CATEGORIES),
            many(KW_COMMENT),
            many(KW_CONTACT),
            many(KW_DESCRIPTION),
            many(KW_EXDATE),
            many(KW_RELATED_TO),
            many(KW_RDATE),
            many(KW_REQUEST_STATUS),
        ],
        children: &[],
        requires_child: false,
    },
    // 3.6.4.  Free/Busy Component
    ComponentRule {
        kind: ComponentKind::FreeBusy,
        properties: &[
            one(KW_DTSTAMP),
            one(KW_UID),
            opt(KW_CONTACT),
            opt(KW_DTSTART),
            opt(KW_DTEND),
            opt(KW_ORGANIZER),
            opt(KW_URL),
            many(KW_ATTENDEE),
            many(KW_COMMENT),
            many(KW_FREEBUSY),
            many(KW_REQUEST_STATUS),
        ],
        children: &[],
        requires_child: false,
    },
    // 3.6.5.  Time Zone Component
    ComponentRule {
        kind: ComponentKind::TimeZone,
        properties: &[one(KW_TZID), opt(KW_LAST_MODIFIED), opt(KW_TZURL)],
        children: &[ComponentKind::Standard, ComponentKind::Daylight],
        requires_child: true,
    },
    ComponentRule {
        kind: ComponentKind::Standard,
        properties: OBSERVANCE_PROPERTIES,
        children: &[],
        requires_child: false,
    },
    ComponentRule {
        kind: ComponentKind::Daylight,
        properties: OBSERVANCE_PROPERTIES,
        children: &[],
        requires_child: false,
    },
    // 3.6.6.  Alarm Component, refined per ACTION below
    ComponentRule {
        kind: ComponentKind::Alarm,
        properties: &[
            one(KW_ACTION),
            one(KW_TRIGGER),
            opt(KW_DURATION),
            opt(KW_REPEAT),
            opt(KW_DESCRIPTION),
            opt(KW_SUMMARY),
            many(KW_ATTENDEE),
            many(KW_ATTACH),
        ],
        children: &[],
        requires_child: false,
    },
];

const OBSERVANCE_PROPERTIES: &[PropertyRule] = &[
    one(KW_DTSTART),
    one(KW_TZOFFSETTO),
    one(KW_TZOFFSETFROM),
    opt(KW_RRULE),
    many(KW_COMMENT),
    many(KW_RDATE),
    many(KW_TZNAME),
];

/// Additional rules for `VALARM`, keyed by the `ACTION` value.
pub static ALARM_ACTION_RULES: &[(&str, &[PropertyRule])] = &[
    (KW_ACTION_AUDIO, &[opt(KW_ATTACH)]),
    (KW_ACTION_DISPLAY, &[one(KW_DESCRIPTION)]),
    (
        KW_ACTION_EMAIL,
        &[one(KW_DESCRIPTION), one(KW_SUMMARY), some(KW_ATTENDEE)],
    ),
];

/// Pairs of properties that must not both occur.
pub static MUTUALLY_EXCLUSIVE: &[(ComponentKind, &str, &str)] = &[
    (ComponentKind::Event, KW_DTEND, KW_DURATION),
    (ComponentKind::Todo, KW_DUE, KW_DURATION),
];

/// Pairs of properties that must occur together or not at all.
pub static REQUIRED_TOGETHER: &[(ComponentKind, &str, &str)] =
    &[(ComponentKind::Alarm, KW_DURATION, KW_REPEAT)];

/// Properties a known parameter may be attached to.
///
/// `VALUE` is allowed on every property and is not listed.
pub static PARAMETER_RULES: &[(ParameterKind, &[&str])] = &[
    (
        ParameterKind::AlternateText,
        &[KW_COMMENT, KW_CONTACT, KW_DESCRIPTION, KW_LOCATION, KW_RESOURCES, KW_SUMMARY],
    ),
    (ParameterKind::CommonName, &[KW_ATTENDEE, KW_ORGANIZER]),
    (ParameterKind::CalendarUserType, &[KW_ATTENDEE]),
    (ParameterKind::Delegators, &[KW_ATTENDEE]),
    (ParameterKind::Delegatees, &[KW_ATTENDEE]),
    (ParameterKind::Directory, &[KW_ATTENDEE, KW_ORGANIZER]),
    (ParameterKind::Encoding, &[KW_ATTACH]),
    (ParameterKind::FormatType, &[KW_ATTACH]),
    (ParameterKind::FreeBusyType, &[KW_FREEBUSY]),
    (
        ParameterKind::Language,
        &[
            KW_ATTENDEE,
            KW_CATEGORIES,
            KW_COMMENT,
            KW_CONTACT,
            KW_DESCRIPTION,
            KW_LOCATION,
            KW_ORGANIZER,
            KW_REQUEST_STATUS,
            KW_RESOURCES,
            KW_SUMMARY,
            KW_TZNAME,
        ],
    ),
    (ParameterKind::Membership, &[KW_ATTENDEE]),
    (ParameterKind::ParticipationStatus, &[KW_ATTENDEE]),
    (ParameterKind::RecurrenceIdRange, &[KW_RECURRENCE_ID]),
    (ParameterKind::TriggerRelationship, &[KW_TRIGGER]),
    (ParameterKind::RelationshipType, &[KW_RELATED_TO]),
    (ParameterKind::ParticipationRole, &[KW_ATTENDEE]),
    (ParameterKind::RsvpExpectation, &[KW_ATTENDEE]),
    (ParameterKind::SentBy, &[KW_ATTENDEE, KW_ORGANIZER]),
    (
        ParameterKind::TimeZoneIdentifier,
        &[KW_DTSTART, KW_DTEND, KW_DUE, KW_EXDATE, KW_RDATE, KW_RECURRENCE_ID],
    ),
];

/// Integer properties and their allowed range.
pub static INTEGER_RANGES: &[(&str, i64, i64)] = &[
    (KW_PRIORITY, 0, 9),
    (KW_PERCENT_COMPLETE, 0, 100),
    (KW_SEQUENCE, 0, i64::MAX),
    (KW_REPEAT, 0, i64::MAX),
];

pub fn component_rule(kind: ComponentKind) -> Option<&'static ComponentRule> {
    COMPONENT_RULES.iter().find(|rule| rule.kind == kind)
}

pub fn parameter_rule(kind: ParameterKind) -> Option<&'static [&'static str]> {
    PARAMETER_RULES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, properties)| *properties)
}
