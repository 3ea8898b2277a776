// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Small exports in the administration system's layout.

pub const ANNA: &str = "72345678901";
pub const BENCE: &str = "72345678902";

/// Three grades for two students. Anna's second row and Bence's only row
/// leave the class column empty.
pub const GRADES_CSV: &str = "\
Tanuló név;Születési idő;Tanuló osztálya;Tanuló azonosítója;Tárgy kategória;Tantárgy;Osztály/Csoport név;Pedagógus név;Téma;Értékelés módja;Osztályzat;Jegy;Szöveges értékelés;Magatartás;Szorgalom;Százalékos értékelés;Bejegyzés dátuma;Rögzítés dátuma
Kiss Anna;2008.03.14.;11.A;72345678901;Természettudomány;Fizika;11.A;Nagy Péter;Hullámok;Témazáró;Jeles;5;;;;;2024.10.01.;2024.10.02.
Kiss Anna;2008.03.14.;;72345678901;Idegen nyelv;Angol nyelv;11.A angol 1;Tóth Éva;Vocabulary;Szóbeli felelet;Jó;4;;;;;2024.10.03.;2024.10.03.
Szabó Bence;2008.07.02.;;72345678902;Matematika;Matematika;11.B;;Függvények;;Közepes;3;;;;;2024.10.04.;2024.10.05.
";

/// Student info for Anna only, with a column the import does not use.
pub const STUDENTS_CSV: &str = "\
Név;Oktatási azonosítója;Osztály;Születési hely
Kiss Anna Júlia;72345678901;11.A;Budapest
";
