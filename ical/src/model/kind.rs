// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Classification of component, property and parameter names.

use std::fmt;

use crate::keyword::{
    KW_ACTION, KW_ALTREP, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_CN,
    KW_COMMENT, KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_CUTYPE, KW_DAYLIGHT, KW_DELEGATED_FROM,
    KW_DELEGATED_TO, KW_DESCRIPTION, KW_DIR, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE,
    KW_DURATION, KW_ENCODING, KW_EXDATE, KW_FBTYPE, KW_FMTTYPE, KW_FREEBUSY, KW_GEO, KW_LANGUAGE,
    KW_LAST_MODIFIED, KW_LOCATION, KW_MEMBER, KW_METHOD, KW_ORGANIZER, KW_PARTSTAT,
    KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RANGE, KW_RDATE, KW_RECURRENCE_ID,
    KW_RELATED, KW_RELATED_TO, KW_RELTYPE, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_ROLE,
    KW_RRULE, KW_RSVP, KW_SENT_BY, KW_SEQUENCE, KW_STANDARD, KW_STATUS, KW_SUMMARY, KW_TRANSP,
    KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_UID, KW_URL,
    KW_VALARM, KW_VALUE, KW_VCALENDAR, KW_VERSION, KW_VEVENT, KW_VFREEBUSY, KW_VJOURNAL,
    KW_VTIMEZONE, KW_VTODO,
};

/// Returns `true` for experimental names (`X-` prefix, any case).
#[must_use]
pub fn is_x_name(name: &str) -> bool {
    name.get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("X-"))
}

/// How a property value is escaped on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single TEXT value, with `\\`, `\;`, `\,` and `\n` escapes
    Text,

    /// A comma separated list of TEXT values
    TextList,

    /// Any other value type, kept verbatim
    Other,
}

impl ValueKind {
    /// Returns `true` if the value uses TEXT escaping.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::TextList)
    }
}

macro_rules! named_kind {
    (
        $(#[$attr:meta])*
        enum $ty:ident {
            $(
                $(#[$variant_attr:meta])*
                $variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ty {
            $(
                $(#[$variant_attr])*
                $variant,
            )+
        }

        impl $ty {
            /// Look up a name, case-insensitively.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name.to_ascii_uppercase().as_str() {
                    $(
                        $kw => Some(Self::$variant),
                    )+
                    _ => None,
                }
            }

            /// Returns the canonical keyword.
            #[must_use]
            pub const fn keyword(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $kw,
                    )+
                }
            }

            #[cfg(test)]
            const ALL: &[Self] = &[$(Self::$variant,)+];
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.keyword().fmt(f)
            }
        }
    };
}

named_kind! {
    /// Components defined in RFC 5545
    enum ComponentKind {
        /// Section 3.4, the calendar object
        Calendar => KW_VCALENDAR,
        /// Section 3.6.1
        Event => KW_VEVENT,
        /// Section 3.6.2
        Todo => KW_VTODO,
        /// Section 3.6.3
        Journal => KW_VJOURNAL,
        /// Section 3.6.4
        FreeBusy => KW_VFREEBUSY,
        /// Section 3.6.5
        TimeZone => KW_VTIMEZONE,
        /// Standard time observance of a time zone
        Standard => KW_STANDARD,
        /// Daylight saving time observance of a time zone
        Daylight => KW_DAYLIGHT,
        /// Section 3.6.6
        Alarm => KW_VALARM,
    }
}

named_kind! {
    /// Property parameters defined in RFC 5545 Section 3.2
    #[expect(missing_docs)]
    enum ParameterKind {
        AlternateText       => KW_ALTREP,
        CommonName          => KW_CN,
        CalendarUserType    => KW_CUTYPE,
        Delegators          => KW_DELEGATED_FROM,
        Delegatees          => KW_DELEGATED_TO,
        Directory           => KW_DIR,
        Encoding            => KW_ENCODING,
        FormatType          => KW_FMTTYPE,
        FreeBusyType        => KW_FBTYPE,
        Language            => KW_LANGUAGE,
        Membership          => KW_MEMBER,
        ParticipationStatus => KW_PARTSTAT,
        RecurrenceIdRange   => KW_RANGE,
        TriggerRelationship => KW_RELATED,
        RelationshipType    => KW_RELTYPE,
        ParticipationRole   => KW_ROLE,
        RsvpExpectation     => KW_RSVP,
        SentBy              => KW_SENT_BY,
        TimeZoneIdentifier  => KW_TZID,
        ValueType           => KW_VALUE,
    }
}

macro_rules! property_kind {
    (
        $(
            $(#[$attr:meta])*
            $variant:ident => $kw:ident => $value:ident
        ),+ $(,)?
    ) => {
        /// Properties defined in RFC 5545 Section 3.7 and 3.8
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PropertyKind {
            $(
                $(#[$attr])*
                $variant,
            )+
            /// Experimental property (`X-` prefix)
            XName,
            /// Any other name, such as an IANA registered property unknown to RFC 5545
            Unrecognized,
        }

        impl PropertyKind {
            /// Classify a property name, case-insensitively.
            #[must_use]
            pub fn from_name(name: &str) -> Self {
                match name.to_ascii_uppercase().as_str() {
                    $(
                        $kw => Self::$variant,
                    )+
                    _ if is_x_name(name) => Self::XName,
                    _ => Self::Unrecognized,
                }
            }

            /// Returns the canonical keyword of a known property.
            #[must_use]
            pub const fn keyword(self) -> Option<&'static str> {
                match self {
                    $(
                        Self::$variant => Some($kw),
                    )+
                    Self::XName | Self::Unrecognized => None,
                }
            }

            /// Returns how the default value type of the property is escaped.
            ///
            /// Unknown and experimental properties are treated as TEXT.
            #[must_use]
            pub const fn value_kind(self) -> ValueKind {
                match self {
                    $(
                        Self::$variant => ValueKind::$value,
                    )+
                    Self::XName | Self::Unrecognized => ValueKind::Text,
                }
            }

            /// Returns `true` for properties defined in RFC 5545.
            #[must_use]
            pub const fn is_known(self) -> bool {
                !matches!(self, Self::XName | Self::Unrecognized)
            }
        }

        #[cfg(test)]
        const KINDS: &[PropertyKind] = &[$(PropertyKind::$variant,)+];
    };
}

property_kind! {
    /// 3.7.1.  Calendar Scale
    CalScale    => KW_CALSCALE  => Text,
    /// 3.7.2.  Method
    Method      => KW_METHOD    => Text,
    /// 3.7.3.  Product Identifier
    ProdId      => KW_PRODID    => Text,
    /// 3.7.4.  Version
    Version     => KW_VERSION   => Text,
    /// 3.8.1.1.  Attachment
    Attach      => KW_ATTACH    => Other,
    /// 3.8.1.2.  Categories
    Categories  => KW_CATEGORIES => TextList,
    /// 3.8.1.3.  Classification
    Class       => KW_CLASS     => Text,
    /// 3.8.1.4.  Comment
    Comment     => KW_COMMENT   => Text,
    /// 3.8.1.5.  Description
    Description => KW_DESCRIPTION => Text,
    /// 3.8.1.6.  Geographic Position
    Geo         => KW_GEO       => Other,
    /// 3.8.1.7.  Location
    Location    => KW_LOCATION  => Text,
    /// 3.8.1.8.  Percent Complete
    PercentComplete => KW_PERCENT_COMPLETE => Other,
    /// 3.8.1.9.  Priority
    Priority    => KW_PRIORITY  => Other,
    /// 3.8.1.10.  Resources
    Resources   => KW_RESOURCES => TextList,
    /// 3.8.1.11.  Status
    Status      => KW_STATUS    => Text,
    /// 3.8.1.12.  Summary
    Summary     => KW_SUMMARY   => Text,
    /// 3.8.2.1.  Date-Time Completed
    Completed   => KW_COMPLETED => Other,
    /// 3.8.2.2.  Date-Time End
    DtEnd       => KW_DTEND     => Other,
    /// 3.8.2.3.  Date-Time Due
    Due         => KW_DUE       => Other,
    /// 3.8.2.4.  Date-Time Start
    DtStart     => KW_DTSTART   => Other,
    /// 3.8.2.5.  Duration
    Duration    => KW_DURATION  => Other,
    /// 3.8.2.6.  Free/Busy Time
    FreeBusy    => KW_FREEBUSY  => Other,
    /// 3.8.2.7.  Time Transparency
    Transp      => KW_TRANSP    => Text,
    /// 3.8.3.1.  Time Zone Identifier
    TzId        => KW_TZID      => Text,
    /// 3.8.3.2.  Time Zone Name
    TzName      => KW_TZNAME    => Text,
    /// 3.8.3.3.  Time Zone Offset From
    TzOffsetFrom => KW_TZOFFSETFROM => Other,
    /// 3.8.3.4.  Time Zone Offset To
    TzOffsetTo  => KW_TZOFFSETTO => Other,
    /// 3.8.3.5.  Time Zone URL
    TzUrl       => KW_TZURL     => Other,
    /// 3.8.4.1.  Attendee
    Attendee    => KW_ATTENDEE  => Other,
    /// 3.8.4.2.  Contact
    Contact     => KW_CONTACT   => Text,
    /// 3.8.4.3.  Organizer
    Organizer   => KW_ORGANIZER => Other,
    /// 3.8.4.4.  Recurrence ID
    RecurrenceId => KW_RECURRENCE_ID => Other,
    /// 3.8.4.5.  Related To
    RelatedTo   => KW_RELATED_TO => Text,
    /// 3.8.4.6.  Uniform Resource Locator
    Url         => KW_URL       => Other,
    /// 3.8.4.7.  Unique Identifier
    Uid         => KW_UID       => Text,
    /// 3.8.5.1.  Exception Date-Times
    ExDate      => KW_EXDATE    => Other,
    /// 3.8.5.2.  Recurrence Date-Times
    RDate       => KW_RDATE     => Other,
    /// 3.8.5.3.  Recurrence Rule
    RRule       => KW_RRULE     => Other,
    /// 3.8.6.1.  Action
    Action      => KW_ACTION    => Text,
    /// 3.8.6.2.  Repeat Count
    Repeat      => KW_REPEAT    => Other,
    /// 3.8.6.3.  Trigger
    Trigger     => KW_TRIGGER   => Other,
    /// 3.8.7.1.  Date-Time Created
    Created     => KW_CREATED   => Other,
    /// 3.8.7.2.  Date-Time Stamp
    DtStamp     => KW_DTSTAMP   => Other,
    /// 3.8.7.3.  Last Modified
    LastModified => KW_LAST_MODIFIED => Other,
    /// 3.8.7.4.  Sequence Number
    Sequence    => KW_SEQUENCE  => Other,
    /// 3.8.8.3.  Request Status, whose `;` separated parts are structure
    RequestStatus => KW_REQUEST_STATUS => Other,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some(kw) => kw.fmt(f),
            None if matches!(self, Self::XName) => f.write_str("X-NAME"),
            None => f.write_str("IANA-TOKEN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn property_kind_lookup_is_case_insensitive() {
        assert_eq!(PropertyKind::from_name("summary"), PropertyKind::Summary);
        assert_eq!(PropertyKind::from_name("Dtstart"), PropertyKind::DtStart);
        assert_eq!(PropertyKind::from_name("x-wr-calname"), PropertyKind::XName);
        assert_eq!(PropertyKind::from_name("COLOR"), PropertyKind::Unrecognized);
        assert_eq!(PropertyKind::XName.to_string(), "X-NAME");
    }

    #[test]
    fn every_known_property_round_trips_through_its_keyword() {
        let mut seen = HashSet::new();
        for &kind in KINDS {
            let kw = kind.keyword().expect("known kind has a keyword");
            assert!(seen.insert(kw), "duplicate keyword {kw}");
            assert_eq!(PropertyKind::from_name(kw), kind);
            assert!(kind.is_known());
        }
    }

    #[test]
    fn component_and_parameter_keywords_are_unique() {
        for &kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_name(kind.keyword()), Some(kind));
        }
        for &kind in ParameterKind::ALL {
            assert_eq!(ParameterKind::from_name(kind.keyword()), Some(kind));
        }
        assert_eq!(ComponentKind::from_name("vevent"), Some(ComponentKind::Event));
        assert_eq!(ComponentKind::from_name("X-WR-THING"), None);
        assert_eq!(ParameterKind::from_name("tzid"), Some(ParameterKind::TimeZoneIdentifier));
    }

    #[test]
    fn value_kinds() {
        assert_eq!(PropertyKind::Summary.value_kind(), ValueKind::Text);
        assert_eq!(PropertyKind::Categories.value_kind(), ValueKind::TextList);
        assert_eq!(PropertyKind::DtStart.value_kind(), ValueKind::Other);
        assert!(PropertyKind::XName.value_kind().is_text());
    }

    #[test]
    fn detects_x_names() {
        assert!(is_x_name("X-FOO"));
        assert!(is_x_name("x-foo"));
        assert!(!is_x_name("X"));
        assert!(!is_x_name("XFOO"));
        assert!(!is_x_name("日本"));
    }
}
