/// Family tree generation.
///
/// Builds parents, siblings, spouse, children and (for depth > 1)
/// extended family around a subject, with ages derived from the
/// subject's age. Every relative is named from the subject's race pool.
///
/// Generation order is fixed: template, surname, parents, siblings,
/// spouse, children, extended family. Changing it changes the output for
/// a given seed.
use rand::Rng;

use crate::core::attributes::generate_gender;
use crate::core::catalog::{CatalogLoadError, CatalogProvider, NameCatalog};
use crate::core::coherence::{is_family_template_valid, MIN_PARENT_AGE};
use crate::core::names::{generate_family_name, generate_name};
use crate::core::random::{chance, coin, int_in, pick, pick_many};
use crate::schema::character::{Gender, Npc};
use crate::schema::family::{FamilyMember, FamilyTemplate, FamilyTree, Relation, SubjectSnapshot};
use crate::schema::race::Race;

/// Upper bound on children regardless of the subject's age.
pub const MAX_CHILDREN: i64 = 5;
/// Upper bound on siblings.
pub const MAX_SIBLINGS: i64 = 3;

/// Odds that each relative is still alive.
pub mod survival {
    pub const FATHER: f64 = 0.7;
    pub const MOTHER: f64 = 0.8;
    pub const SIBLING: f64 = 0.95;
    pub const SPOUSE: f64 = 0.9;
    pub const CHILD: f64 = 0.98;
    pub const GRANDPARENT: f64 = 0.6;
    pub const UNCLE_AUNT: f64 = 0.8;
    pub const COUSIN: f64 = 0.9;
}

/// Groups of extended family, each populated with one or two members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtendedKind {
    Grandparent,
    UncleOrAunt,
    Cousin,
}

const EXTENDED_KINDS: [ExtendedKind; 3] = [
    ExtendedKind::Grandparent,
    ExtendedKind::UncleOrAunt,
    ExtendedKind::Cousin,
];

/// Assembles a [`FamilyTree`] bucket by bucket. Nothing is visible until
/// [`FamilyTreeBuilder::build`] hands over the finished tree.
#[derive(Debug)]
pub struct FamilyTreeBuilder {
    subject: SubjectSnapshot,
    template_id: Option<String>,
    parents: Vec<FamilyMember>,
    siblings: Vec<FamilyMember>,
    spouse: Option<FamilyMember>,
    children: Vec<FamilyMember>,
    extended_family: Vec<FamilyMember>,
}

impl FamilyTreeBuilder {
    pub fn new(subject: SubjectSnapshot) -> Self {
        Self {
            subject,
            template_id: None,
            parents: Vec::new(),
            siblings: Vec::new(),
            spouse: None,
            children: Vec::new(),
            extended_family: Vec::new(),
        }
    }

    pub fn template_id(mut self, id: Option<String>) -> Self {
        self.template_id = id;
        self
    }

    /// Place a member in the bucket its relation belongs to. A second
    /// spouse replaces the first.
    pub fn add(&mut self, member: FamilyMember) {
        match member.relation {
            Relation::Father | Relation::Mother => self.parents.push(member),
            Relation::OlderSibling | Relation::YoungerSibling => self.siblings.push(member),
            Relation::Spouse => self.spouse = Some(member),
            Relation::Child => self.children.push(member),
            Relation::Grandparent | Relation::Uncle | Relation::Aunt | Relation::Cousin => {
                self.extended_family.push(member)
            }
        }
    }

    pub fn build(self) -> FamilyTree {
        FamilyTree {
            subject: self.subject,
            template_id: self.template_id,
            parents: self.parents,
            siblings: self.siblings,
            spouse: self.spouse,
            children: self.children,
            extended_family: self.extended_family,
        }
    }
}

/// Generate a family tree for `subject`.
///
/// Never fails: if a catalog cannot be loaded the result is a tree with
/// only the subject snapshot and empty relation buckets.
pub fn generate_family_tree<P, R>(provider: &P, subject: &Npc, depth: u32, rng: &mut R) -> FamilyTree
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    match try_generate_family_tree(provider, subject, depth, rng) {
        Ok(tree) => tree,
        Err(e) => {
            log::warn!("family tree for '{}' degraded to subject only: {}", subject.name, e);
            FamilyTree::minimal(subject.snapshot())
        }
    }
}

/// Generate a family tree, reporting catalog failures instead of degrading.
pub fn try_generate_family_tree<P, R>(
    provider: &P,
    subject: &Npc,
    depth: u32,
    rng: &mut R,
) -> Result<FamilyTree, CatalogLoadError>
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    let templates = provider.family_templates()?;
    let names = provider.names()?;
    let race = subject.race.as_ref();

    let template = select_template(&templates, race, subject.age, rng);
    log::debug!(
        "family template {:?} for '{}' (age {})",
        template.id,
        subject.name,
        subject.age
    );

    let surname = family_surname(&subject.name, &names, race, rng);

    let relatives = RelativeGenerator {
        names: &names,
        race,
        subject_age: subject.age as i64,
        subject_gender: subject.gender,
        surname: &surname,
    };

    let mut builder = FamilyTreeBuilder::new(subject.snapshot()).template_id(template.id.clone());

    if template.has_parents {
        relatives.parents(&mut builder, rng);
    }
    if template.has_siblings {
        relatives.siblings(&mut builder, rng);
    }
    if template.has_spouse {
        relatives.spouse(&mut builder, rng);
    }
    if template.has_children {
        relatives.children(&mut builder, rng);
    }
    if depth.max(1) > 1 && template.has_extended_family {
        relatives.extended_family(&mut builder, rng);
    }

    Ok(builder.build())
}

/// Pick a template valid for the subject, or the parents-and-siblings
/// fallback when none qualifies.
pub fn select_template<R: Rng + ?Sized>(
    templates: &[FamilyTemplate],
    race: Option<&Race>,
    age: u32,
    rng: &mut R,
) -> FamilyTemplate {
    let valid: Vec<&FamilyTemplate> = templates
        .iter()
        .filter(|t| is_family_template_valid(race, age, t))
        .collect();

    pick(&valid, rng)
        .map(|t| (*t).clone())
        .unwrap_or_else(FamilyTemplate::fallback)
}

/// Surname shared by the family: the last word of the subject's name if
/// it has more than one, otherwise a fresh draw from the race pool.
pub fn family_surname<R: Rng + ?Sized>(
    subject_name: &str,
    names: &NameCatalog,
    race: Option<&Race>,
    rng: &mut R,
) -> String {
    if subject_name.contains(' ') {
        if let Some(last) = subject_name.split(' ').last() {
            return last.to_string();
        }
    }
    generate_family_name(names, race, rng)
}

/// Apply the family surname unless the name already carries it: the
/// first word of the drawn name is kept and the surname appended.
pub fn with_family_surname(name: String, surname: &str) -> String {
    if surname.is_empty() || name.contains(surname) {
        return name;
    }
    let first = name.split(' ').next().unwrap_or_default();
    format!("{} {}", first, surname)
}

/// Per-call generation state shared by the relation steps.
struct RelativeGenerator<'a> {
    names: &'a NameCatalog,
    race: Option<&'a Race>,
    subject_age: i64,
    subject_gender: Gender,
    surname: &'a str,
}

impl RelativeGenerator<'_> {
    fn member<R: Rng + ?Sized>(
        &self,
        relation: Relation,
        gender: Gender,
        age: i64,
        alive_chance: f64,
        shares_surname: bool,
        rng: &mut R,
    ) -> FamilyMember {
        let is_alive = chance(alive_chance, rng);
        let drawn = generate_name(self.names, self.race, gender, rng);
        let name = if shares_surname {
            with_family_surname(drawn, self.surname)
        } else {
            drawn
        };

        FamilyMember {
            relation,
            race: self.race.map(|r| r.id.clone()),
            gender,
            age: u32::try_from(age.max(0)).unwrap_or(u32::MAX),
            is_alive,
            name,
        }
    }

    fn parents<R: Rng + ?Sized>(&self, builder: &mut FamilyTreeBuilder, rng: &mut R) {
        let father_age = self.subject_age + int_in(20, 40, rng);
        let father = self.member(
            Relation::Father,
            Gender::Male,
            father_age,
            survival::FATHER,
            true,
            rng,
        );
        builder.add(father);

        let mother_age = self.subject_age + int_in(20, 35, rng);
        let mother = self.member(
            Relation::Mother,
            Gender::Female,
            mother_age,
            survival::MOTHER,
            true,
            rng,
        );
        builder.add(mother);
    }

    fn siblings<R: Rng + ?Sized>(&self, builder: &mut FamilyTreeBuilder, rng: &mut R) {
        let count = int_in(0, MAX_SIBLINGS, rng);
        for _ in 0..count {
            let older = coin(rng);
            let gap = int_in(1, 5, rng);
            let (relation, age) = if older {
                (Relation::OlderSibling, self.subject_age + gap)
            } else {
                (Relation::YoungerSibling, self.subject_age - gap)
            };
            let gender = generate_gender(rng);
            let sibling = self.member(relation, gender, age, survival::SIBLING, true, rng);
            builder.add(sibling);
        }
    }

    fn spouse<R: Rng + ?Sized>(&self, builder: &mut FamilyTreeBuilder, rng: &mut R) {
        let candidates: &[Gender] = match self.subject_gender {
            Gender::Male => &[Gender::Female, Gender::Male],
            Gender::Female => &[Gender::Male, Gender::Female],
            Gender::Nonbinary => &[Gender::Male, Gender::Female, Gender::Nonbinary],
        };
        let gender = pick(candidates, rng).copied().unwrap_or(Gender::Nonbinary);
        let age = self.subject_age + int_in(-3, 5, rng);
        let spouse = self.member(Relation::Spouse, gender, age, survival::SPOUSE, false, rng);
        builder.add(spouse);
    }

    fn children<R: Rng + ?Sized>(&self, builder: &mut FamilyTreeBuilder, rng: &mut R) {
        let min_parent_age = MIN_PARENT_AGE as i64;
        if self.subject_age < min_parent_age {
            return;
        }

        let max_children = (self.subject_age - min_parent_age) / 2;
        let count = int_in(0, max_children.min(MAX_CHILDREN), rng);
        log::debug!("{} children (max {})", count, max_children);

        for _ in 0..count {
            let age = int_in(0, self.subject_age - min_parent_age, rng);
            let gender = generate_gender(rng);
            let child = self.member(Relation::Child, gender, age, survival::CHILD, true, rng);
            builder.add(child);
        }
    }

    fn extended_family<R: Rng + ?Sized>(&self, builder: &mut FamilyTreeBuilder, rng: &mut R) {
        let kind_count = int_in(1, EXTENDED_KINDS.len() as i64, rng) as usize;
        let kinds = pick_many(&EXTENDED_KINDS, kind_count, rng);

        for kind in kinds {
            let members = int_in(1, 2, rng);
            for _ in 0..members {
                let relative = match kind {
                    ExtendedKind::Grandparent => {
                        let gender = generate_gender(rng);
                        let age = self.subject_age + int_in(40, 70, rng);
                        self.member(
                            Relation::Grandparent,
                            gender,
                            age,
                            survival::GRANDPARENT,
                            false,
                            rng,
                        )
                    }
                    ExtendedKind::UncleOrAunt => {
                        let (relation, gender) = if coin(rng) {
                            (Relation::Uncle, Gender::Male)
                        } else {
                            (Relation::Aunt, Gender::Female)
                        };
                        let age = self.subject_age + int_in(20, 40, rng);
                        self.member(relation, gender, age, survival::UNCLE_AUNT, false, rng)
                    }
                    ExtendedKind::Cousin => {
                        let gender = generate_gender(rng);
                        let age = self.subject_age + int_in(-10, 10, rng);
                        self.member(Relation::Cousin, gender, age, survival::COUSIN, false, rng)
                    }
                };
                builder.add(relative);
            }
        }
    }
}
