use crate::decode_record::RecordMetadata;
use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn record_trait(record: &RecordMetadata) -> TokenStream {
    let struct_name = &record.item.ident;
    let record_name = struct_name.to_string();
    let collected = record.fields.iter().filter(|f| f.is_collected());
    let slots_count = collected.clone().count();
    let slots = collected.clone().map(|f| {
        let position = f.position;
        let ty = &f.ty;
        if f.flatten {
            quote! {
                ::rowscan::Slot::Flatten(#position, <#ty as ::rowscan::Record>::schema())
            }
        } else {
            let name = &f.name;
            let label = &f.label;
            let settable = !f.readonly;
            quote! {
                ::rowscan::Slot::Field(
                    #position,
                    ::rowscan::FieldDef::new(
                        #name,
                        #label,
                        <#ty as ::rowscan::FromValue>::KIND,
                        <#ty as ::rowscan::FromValue>::NULLABLE,
                        #settable,
                    ),
                )
            }
        }
    });
    let arms = collected.filter(|f| !f.readonly).map(|f| {
        let position = f.position;
        let ident = &f.ident;
        let ty = &f.ty;
        if f.flatten {
            quote! {
                [#position, rest @ ..] => ::rowscan::Record::assign(&mut self.#ident, rest, value),
            }
        } else {
            quote! {
                [#position] => {
                    self.#ident = <#ty as ::rowscan::FromValue>::from_value(value)?;
                    Ok(())
                }
            }
        }
    });
    quote! {
        impl ::rowscan::Record for #struct_name {
            fn schema() -> &'static ::rowscan::Schema {
                static SCHEMA: ::std::sync::LazyLock<::rowscan::Schema> =
                    ::std::sync::LazyLock::new(|| {
                        let slots: [::rowscan::Slot; #slots_count] = [#(#slots),*];
                        ::rowscan::Schema::build(#record_name, slots)
                    });
                &SCHEMA
            }

            fn record_schema(&self) -> &'static ::rowscan::Schema {
                <Self as ::rowscan::Record>::schema()
            }

            fn assign(
                &mut self,
                route: &[u16],
                value: ::rowscan::Value,
            ) -> ::std::result::Result<(), ::rowscan::Value> {
                match route {
                    #(#arms)*
                    _ => Err(value),
                }
            }
        }

        impl ::rowscan::Destination for #struct_name {
            fn target(&mut self) -> ::rowscan::Target<'_> {
                ::rowscan::Target::Record(self)
            }
        }
    }
}
