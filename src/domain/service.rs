use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use super::formatters::{
    default::DefaultFormatter, electric::ElectricFormatter, rent::RentFormatter, RowFormatter,
};

/// A metered service. Each one has its own tab in the spreadsheet, named
/// after the lowercase variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceName {
    Electric,
    Gas,
    Water,
    Rent,
}

impl ServiceName {
    pub fn sheet_title(&self) -> &'static str {
        self.into()
    }

    pub fn formatter(self) -> Box<dyn RowFormatter> {
        match self {
            ServiceName::Electric => Box::new(ElectricFormatter::new(self)),
            ServiceName::Gas | ServiceName::Water => Box::new(DefaultFormatter::new(self)),
            ServiceName::Rent => Box::new(RentFormatter::new(self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_service_names() {
        assert_eq!("electric".parse::<ServiceName>(), Ok(ServiceName::Electric));
        assert_eq!("gas".parse::<ServiceName>(), Ok(ServiceName::Gas));
        assert_eq!("water".parse::<ServiceName>(), Ok(ServiceName::Water));
        assert_eq!("rent".parse::<ServiceName>(), Ok(ServiceName::Rent));
        assert!("heating".parse::<ServiceName>().is_err());
    }

    #[test]
    fn test_sheet_title_is_lowercase_name() {
        for service in ServiceName::iter() {
            assert_eq!(service.sheet_title(), service.to_string());
        }
        assert_eq!(ServiceName::VARIANTS, &["electric", "gas", "water", "rent"]);
    }

    #[test]
    fn test_formatter_keeps_service() {
        for service in ServiceName::iter() {
            assert_eq!(service.formatter().service(), service);
        }
    }
}
