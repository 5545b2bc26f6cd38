use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{Field, Ident, LitStr, Type, Visibility, ext::IdentExt, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) position: u16,
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) public: bool,
    pub(crate) skip: bool,
    pub(crate) flatten: bool,
    pub(crate) readonly: bool,
}

impl FieldMetadata {
    /// Fields that take part in the schema.
    pub(crate) fn is_collected(&self) -> bool {
        !self.skip && (self.public || self.flatten)
    }
}

pub(crate) fn decode_field(field: &Field, position: u16, rename_all: Option<Case>) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let name = ident.unraw().to_string();
    let mut metadata = FieldMetadata {
        ident,
        ty: field.ty.clone(),
        position,
        label: match rename_all {
            Some(case) => name.to_case(case),
            None => name.clone(),
        },
        name,
        public: matches!(field.vis, Visibility::Public(..)),
        skip: false,
        flatten: false,
        readonly: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("record") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `record`, use it like: `#[record(attribute = value, ...)]`",
                );
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[record(name = \"my_column\")]`");
                    };
                    metadata.label = v.value();
                } else if arg.path.is_ident("skip") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `skip`, use it like: `#[record(skip)]`");
                    };
                    metadata.skip = true;
                } else if arg.path.is_ident("flatten") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `flatten`, use it like: `#[record(flatten)]`");
                    };
                    metadata.flatten = true;
                } else if arg.path.is_ident("readonly") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `readonly`, use it like: `#[record(readonly)]`");
                    };
                    metadata.readonly = true;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside record macro",
                        arg.path.to_token_stream().to_string()
                    );
                }
                Ok(())
            });
        }
    }
    if metadata.flatten && metadata.readonly {
        panic!(
            "Field `{}` cannot be both `flatten` and `readonly`",
            metadata.name
        );
    }
    metadata
}
