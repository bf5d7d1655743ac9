mod grouping;
mod leniency;
mod matcher_regexps;
mod phone_number_match;
mod phonenumbermatcher;

pub use leniency::Leniency;
pub use phone_number_match::PhoneNumberMatch;
pub use phonenumbermatcher::PhoneNumberMatcher;
