//! Schema synthesis from type shapes.
//!
//! [`Synthesizer`] walks a [`TypeShape`] and emits a [`Schema`]. Every named
//! type reached along the way is stored once in a [`DefinitionsStore`] and
//! replaced by a reference; anonymous types are inlined.

use std::borrow::Cow;

use tess_config::SynthesisConfig;
use tess_core::{AdditionalProperties, Definitions, NamedSchema, Referenced, Schema, SchemaType};

use crate::error::SchemaError;
use crate::shape::{Describe, Field, SumShape, TypeRef, TypeShape, Variant, VariantPayload};
use crate::store::{DefinitionsStore, NameCollision};
use crate::sum::{EncodedPayload, EncodedVariant, empty_array, encode_sum};

/// Derive the schema of `T` together with every definition it needs.
///
/// The root itself only lands in the definitions table when it refers to
/// itself; otherwise the caller decides where its named schema goes.
///
/// # Errors
///
/// Returns the first [`SchemaError`] met anywhere in the type graph.
pub fn synthesize<T: Describe + ?Sized>(
    config: &SynthesisConfig,
) -> Result<(Definitions<Schema>, NamedSchema), SchemaError> {
    let mut synthesizer = Synthesizer::new(config);
    let named = synthesizer.named_schema::<T>()?;
    tracing::debug!(
        root = named.name.as_deref().unwrap_or("<anonymous>"),
        definitions = synthesizer.store.len(),
        "synthesized schema"
    );
    Ok((synthesizer.finish(), named))
}

/// Stateful synthesis over a shared definitions table.
///
/// Public calls are transactional: if one fails, the store is left as it
/// was before the call.
#[derive(Debug, Clone)]
pub struct Synthesizer<'a> {
    config: &'a SynthesisConfig,
    store: DefinitionsStore,
}

impl<'a> Synthesizer<'a> {
    #[must_use]
    pub fn new(config: &'a SynthesisConfig) -> Self {
        Self {
            config,
            store: DefinitionsStore::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &SynthesisConfig {
        self.config
    }

    #[must_use]
    pub const fn store(&self) -> &DefinitionsStore {
        &self.store
    }

    #[must_use]
    pub fn collisions(&self) -> &[NameCollision] {
        self.store.collisions()
    }

    /// The named schema of `T`. Nested named types are stored as a side
    /// effect.
    ///
    /// # Errors
    ///
    /// See [`synthesize`].
    pub fn named_schema<T: Describe + ?Sized>(&mut self) -> Result<NamedSchema, SchemaError> {
        self.named_schema_of(&TypeRef::of::<T>())
    }

    /// [`Self::named_schema`] for a type handle.
    ///
    /// # Errors
    ///
    /// See [`synthesize`].
    pub fn named_schema_of(&mut self, ty: &TypeRef) -> Result<NamedSchema, SchemaError> {
        self.transaction(|synth| synth.root(ty))
    }

    /// A reference to `T`, storing its definition if it is named.
    ///
    /// Anonymous types come back inline.
    ///
    /// # Errors
    ///
    /// See [`synthesize`].
    pub fn declare<T: Describe + ?Sized>(&mut self) -> Result<Referenced<Schema>, SchemaError> {
        self.declare_ref(&TypeRef::of::<T>())
    }

    /// [`Self::declare`] for a type handle.
    ///
    /// # Errors
    ///
    /// See [`synthesize`].
    pub fn declare_ref(&mut self, ty: &TypeRef) -> Result<Referenced<Schema>, SchemaError> {
        self.transaction(|synth| synth.reference(ty))
    }

    /// The named schema of `T` computed against a scratch copy of the store.
    ///
    /// Nothing the preview declares is kept.
    ///
    /// # Errors
    ///
    /// See [`synthesize`].
    pub fn preview<T: Describe + ?Sized>(&self) -> Result<NamedSchema, SchemaError> {
        let mut scratch = self.clone();
        scratch.root(&TypeRef::of::<T>())
    }

    /// Committed definitions so far, in registration order.
    #[must_use]
    pub fn definitions(&self) -> Definitions<Schema> {
        self.store.definitions()
    }

    #[must_use]
    pub fn finish(self) -> Definitions<Schema> {
        self.store.into_definitions()
    }

    fn transaction<R>(
        &mut self,
        run: impl FnOnce(&mut Self) -> Result<R, SchemaError>,
    ) -> Result<R, SchemaError> {
        let checkpoint = self.store.clone();
        run(self).inspect_err(|_| self.store = checkpoint)
    }

    fn root(&mut self, ty: &TypeRef) -> Result<NamedSchema, SchemaError> {
        let Some(name) = ty.name() else {
            return Ok(NamedSchema::anonymous(self.schema_of(ty)?));
        };
        if let Some(existing) = self.store.get(&name) {
            let existing = existing.clone();
            self.store.note_reference(&name, ty);
            return Ok(NamedSchema::named(name, existing));
        }

        // Claimed while computing so recursive occurrences become references.
        // Kept only if one actually did.
        self.store.claim(&name, ty);
        let schema = self.schema_of(ty)?;
        if self.store.is_referenced(&name) {
            self.store.commit(&name, schema.clone());
        } else {
            self.store.release(&name);
        }
        Ok(NamedSchema::named(name, schema))
    }

    fn reference(&mut self, ty: &TypeRef) -> Result<Referenced<Schema>, SchemaError> {
        let Some(name) = ty.name() else {
            return Ok(Referenced::Inline(self.schema_of(ty)?));
        };
        if self.store.is_claimed(&name) {
            self.store.note_reference(&name, ty);
            return Ok(Referenced::Ref(name.into_owned()));
        }

        self.store.claim(&name, ty);
        self.store.note_reference(&name, ty);
        let schema = self.schema_of(ty)?;
        self.store.commit(&name, schema);
        Ok(Referenced::Ref(name.into_owned()))
    }

    fn schema_of(&mut self, ty: &TypeRef) -> Result<Schema, SchemaError> {
        match ty.shape() {
            TypeShape::Leaf(scalar) => scalar.schema(),
            TypeShape::Array(item) => Ok(Schema::array(self.reference(&item)?)),
            TypeShape::Set(item) => Ok(Schema {
                unique_items: Some(true),
                ..Schema::array(self.reference(&item)?)
            }),
            TypeShape::Map(value) => Ok(Schema {
                additional_properties: Some(AdditionalProperties::Schema(Box::new(
                    self.reference(&value)?,
                ))),
                ..Schema::new(SchemaType::Object)
            }),
            TypeShape::Nullable(inner) => Ok(nullable(self.reference(&inner)?)),
            TypeShape::Record(fields) => {
                if self.config.unwrap_unary_records && fields.len() == 1 {
                    return Ok(detached(self.reference(&fields[0].ty)?));
                }
                self.record(&fields)
            }
            TypeShape::Tuple(items) => self.tuple(&items),
            TypeShape::Sum(sum) => self.sum(ty, sum),
            TypeShape::Custom(schema) => Ok(schema),
        }
    }

    fn record(&mut self, fields: &[Field]) -> Result<Schema, SchemaError> {
        let mut schema = Schema::object();
        for field in fields {
            let name = self.config.field_rename.apply_to_field(&field.name);
            let property = self.reference(&field.ty)?;
            schema = schema.with_property(name, property, field.required);
        }
        Ok(schema)
    }

    fn tuple(&mut self, items: &[TypeRef]) -> Result<Schema, SchemaError> {
        let items = items
            .iter()
            .map(|item| self.reference(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Schema::tuple(items))
    }

    fn sum(&mut self, ty: &TypeRef, sum: SumShape) -> Result<Schema, SchemaError> {
        let rename = sum.tag_rename.unwrap_or(self.config.tag_rename);
        let tag_of = |variant: &Variant| rename.apply_to_variant(&variant.tag);

        if sum.variants.is_empty() {
            // Uninhabited: nothing validates.
            return Ok(Schema {
                not: Some(Box::new(Referenced::Inline(Schema::default()))),
                ..Schema::default()
            });
        }

        if self.config.compact_enums && sum.all_nullary() {
            return Ok(Schema::string_enum(sum.variants.iter().map(tag_of)));
        }

        if let [only] = sum.variants.as_slice() {
            if !self.config.tag_single_variants {
                return self.untagged_single(only);
            }
        }

        let encoding = sum
            .encoding
            .clone()
            .unwrap_or_else(|| self.config.sum_encoding.clone());
        let mut variants = Vec::with_capacity(sum.variants.len());
        for variant in &sum.variants {
            variants.push(EncodedVariant::new(tag_of(variant), self.payload(variant)?));
        }
        encode_sum(&type_display_name(ty), &encoding, variants)
    }

    /// A lone variant is encoded as its payload, with no tag.
    fn untagged_single(&mut self, variant: &Variant) -> Result<Schema, SchemaError> {
        match &variant.payload {
            VariantPayload::Unit => Ok(empty_array()),
            VariantPayload::Record(fields) => {
                if self.config.unwrap_unary_records && fields.len() == 1 {
                    return Ok(detached(self.reference(&fields[0].ty)?));
                }
                self.record(fields)
            }
            VariantPayload::Tuple(items) => match items.as_slice() {
                [inner] => Ok(detached(self.reference(inner)?)),
                _ => self.tuple(items),
            },
        }
    }

    fn payload(&mut self, variant: &Variant) -> Result<EncodedPayload, SchemaError> {
        if variant.is_nullary() {
            return Ok(EncodedPayload::Nullary);
        }
        match &variant.payload {
            VariantPayload::Unit => Ok(EncodedPayload::Nullary),
            VariantPayload::Record(fields) => {
                if self.config.unwrap_unary_variant_payloads && fields.len() == 1 {
                    return Ok(EncodedPayload::Value(self.reference(&fields[0].ty)?));
                }
                Ok(EncodedPayload::Record(self.record(fields)?))
            }
            VariantPayload::Tuple(items) => match items.as_slice() {
                [inner] => {
                    let record_shaped = variant.is_record_shaped(
                        self.config.unwrap_unary_records,
                        self.config.unwrap_unary_variant_payloads,
                    );
                    match self.reference(inner)? {
                        Referenced::Inline(schema) if record_shaped => {
                            Ok(EncodedPayload::Record(schema))
                        }
                        reference @ Referenced::Ref(_) if record_shaped => {
                            Ok(EncodedPayload::RecordRef(reference))
                        }
                        other => Ok(EncodedPayload::Value(other)),
                    }
                }
                _ => Ok(EncodedPayload::Value(Referenced::Inline(self.tuple(items)?))),
            },
        }
    }
}

/// Widen a schema to also accept `null`: `anyOf` of the inner schema and
/// `{"type": "null"}`. Schemas that already accept `null` are kept as is.
fn nullable(inner: Referenced<Schema>) -> Schema {
    if let Referenced::Inline(schema) = &inner {
        if accepts_null(schema) {
            return detached(inner);
        }
    }
    Schema {
        any_of: Some(vec![inner, Referenced::Inline(Schema::null())]),
        ..Schema::default()
    }
}

fn accepts_null(schema: &Schema) -> bool {
    let null = Referenced::Inline(Schema::null());
    schema.is_empty()
        || schema.schema_type == Some(SchemaType::Null)
        || schema
            .any_of
            .as_ref()
            .is_some_and(|alternatives| alternatives.contains(&null))
}

/// A schema standing for another one, by value or through `allOf`.
fn detached(inner: Referenced<Schema>) -> Schema {
    match inner {
        Referenced::Inline(schema) => schema,
        reference @ Referenced::Ref(_) => Schema {
            all_of: Some(vec![reference]),
            ..Schema::default()
        },
    }
}

fn type_display_name(ty: &TypeRef) -> String {
    ty.name()
        .map_or_else(|| ty.rust_name().to_string(), Cow::into_owned)
}
