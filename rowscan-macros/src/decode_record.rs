use crate::decode_field::{FieldMetadata, decode_field};
use convert_case::Case;
use syn::{Fields, ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) struct RecordMetadata {
    pub(crate) item: ItemStruct,
    pub(crate) fields: Vec<FieldMetadata>,
}

fn decode_case(value: &str) -> Case {
    match value {
        "lowercase" => Case::Lower,
        "UPPERCASE" => Case::Upper,
        "camelCase" => Case::Camel,
        "PascalCase" => Case::Pascal,
        "snake_case" => Case::Snake,
        "SCREAMING_SNAKE_CASE" => Case::UpperSnake,
        "kebab-case" => Case::Kebab,
        _ => panic!(
            "Unknown case `{value}` in `rename_all`, expected one of: lowercase, UPPERCASE, camelCase, PascalCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case"
        ),
    }
}

pub(crate) fn decode_record(item: ItemStruct) -> RecordMetadata {
    if !item.generics.params.is_empty() {
        panic!("Record `{}` cannot have generic parameters", item.ident);
    }
    let Fields::Named(..) = &item.fields else {
        panic!("Record `{}` must be a struct with named fields", item.ident);
    };
    let mut rename_all = None;
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("record") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `record`, use it like: `#[record(attribute = value, ..)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("rename_all") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `rename_all`, use it like: `#[record(rename_all = \"camelCase\")]`"
                        );
                    };
                    rename_all = Some(decode_case(&value.value()));
                } else {
                    panic!("Unknown attribute `{}` inside record macro", arg.path.get_ident().map(ToString::to_string).unwrap_or_default());
                }
                Ok(())
            });
        }
    }
    let fields = item
        .fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let position = u16::try_from(i).expect("Record has too many fields");
            decode_field(f, position, rename_all)
        })
        .collect();
    RecordMetadata { item, fields }
}
